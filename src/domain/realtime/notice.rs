//! Transient user-facing notices (toasts).

use serde::Serialize;

use crate::domain::foundation::{NoticeId, Timestamp};

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    #[default]
    Default,
    Destructive,
}

/// A toast shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: NoticeId,
    pub title: String,
    pub description: Option<String>,
    pub variant: NoticeVariant,
    pub created_at: Timestamp,
}

impl Notice {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: NoticeId::new(),
            title: title.into(),
            description: None,
            variant: NoticeVariant::Default,
            created_at: Timestamp::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn destructive(mut self) -> Self {
        self.variant = NoticeVariant::Destructive;
        self
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}
