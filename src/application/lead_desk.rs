//! LeadDesk - submits customer leads and reports the outcome as notices.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};
use crate::domain::leads::{
    FinancingApplication, LeadReceipt, TestDriveRequest, TradeInSubmission,
};
use crate::domain::realtime::Notice;
use crate::ports::{ApiError, LeadGateway, NoticeSink};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeadError {
    #[error("sign in required")]
    SignInRequired,

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<LeadError> for DomainError {
    fn from(err: LeadError) -> Self {
        match err {
            LeadError::SignInRequired => DomainError::new(ErrorCode::Unauthorized, err.to_string()),
            LeadError::Invalid(e) => e.into(),
            LeadError::Api(e) => e.into(),
        }
    }
}

pub struct LeadDesk {
    leads: Arc<dyn LeadGateway>,
    notices: Arc<dyn NoticeSink>,
}

impl LeadDesk {
    pub fn new(leads: Arc<dyn LeadGateway>, notices: Arc<dyn NoticeSink>) -> Self {
        Self { leads, notices }
    }

    /// Books a test drive for a signed-in customer.
    pub async fn book_test_drive(
        &self,
        identity: Option<&UserId>,
        request: &TestDriveRequest,
    ) -> Result<LeadReceipt, LeadError> {
        if identity.is_none() {
            self.notices.show(
                Notice::new("Sign in required")
                    .with_description("Please sign in to book a test drive")
                    .destructive(),
            );
            return Err(LeadError::SignInRequired);
        }
        self.check(request.validate())?;

        match self.leads.book_test_drive(request).await {
            Ok(receipt) => {
                tracing::info!(vehicle_id = %request.vehicle_id, "Test drive booked");
                self.notices.show(
                    Notice::new("Test Drive Booked!")
                        .with_description("We will contact you shortly to confirm your appointment."),
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Test drive booking failed");
                let message = e.to_string();
                let description = if message.trim().is_empty() {
                    "Failed to book test drive".to_string()
                } else {
                    message
                };
                self.notices
                    .show(Notice::new("Error").with_description(description).destructive());
                Err(e.into())
            }
        }
    }

    pub async fn apply_for_financing(
        &self,
        application: &FinancingApplication,
    ) -> Result<LeadReceipt, LeadError> {
        self.check(application.validate())?;

        match self.leads.apply_for_financing(application).await {
            Ok(receipt) => {
                tracing::info!("Financing application submitted");
                self.notices.show(
                    Notice::new("Application submitted!")
                        .with_description("We'll contact you shortly to review your application."),
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Financing application failed");
                let notice = match e {
                    ApiError::Status { .. } | ApiError::Rejected(_) => Notice::new("Submission failed")
                        .with_description(
                            "Please try again or contact support if the issue persists.",
                        ),
                    ApiError::Network(_) | ApiError::Parse(_) => {
                        Notice::new("Something went wrong").with_description("Please try again later.")
                    }
                };
                self.notices.show(notice);
                Err(e.into())
            }
        }
    }

    pub async fn submit_trade_in(
        &self,
        submission: &TradeInSubmission,
        current_year: i32,
    ) -> Result<LeadReceipt, LeadError> {
        self.check(submission.validate(current_year))?;

        match self.leads.submit_trade_in(submission).await {
            Ok(receipt) => {
                tracing::info!(brand = %submission.brand, model = %submission.model, "Trade-in submitted");
                self.notices.show(
                    Notice::new("Submission Successful!").with_description(
                        "We will evaluate your vehicle and contact you within 24 hours.",
                    ),
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Trade-in submission failed");
                self.notices.show(
                    Notice::new("Error")
                        .with_description("Failed to submit your vehicle")
                        .destructive(),
                );
                Err(e.into())
            }
        }
    }

    fn check(&self, validation: Result<(), ValidationError>) -> Result<(), LeadError> {
        validation.map_err(|e| {
            self.notices
                .show(Notice::new("Error").with_description(e.to_string()).destructive());
            LeadError::Invalid(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::RecordingNoticeSink;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Gateway returning one canned result for every submission.
    struct CannedGateway {
        result: Result<LeadReceipt, ApiError>,
        calls: Mutex<u32>,
    }

    impl CannedGateway {
        fn new(result: Result<LeadReceipt, ApiError>) -> Self {
            Self {
                result,
                calls: Mutex::new(0),
            }
        }

        fn respond(&self) -> Result<LeadReceipt, ApiError> {
            *self.calls.lock().unwrap() += 1;
            self.result.clone()
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl LeadGateway for CannedGateway {
        async fn book_test_drive(&self, _: &TestDriveRequest) -> Result<LeadReceipt, ApiError> {
            self.respond()
        }

        async fn apply_for_financing(
            &self,
            _: &FinancingApplication,
        ) -> Result<LeadReceipt, ApiError> {
            self.respond()
        }

        async fn submit_trade_in(&self, _: &TradeInSubmission) -> Result<LeadReceipt, ApiError> {
            self.respond()
        }
    }

    fn ok_receipt() -> Result<LeadReceipt, ApiError> {
        Ok(LeadReceipt {
            success: true,
            message: None,
        })
    }

    fn desk(result: Result<LeadReceipt, ApiError>) -> (LeadDesk, Arc<CannedGateway>, Arc<RecordingNoticeSink>) {
        let gateway = Arc::new(CannedGateway::new(result));
        let notices = Arc::new(RecordingNoticeSink::new());
        (LeadDesk::new(gateway.clone(), notices.clone()), gateway, notices)
    }

    fn booking() -> TestDriveRequest {
        TestDriveRequest {
            vehicle_id: "veh_1".to_string(),
            preferred_date: "2026-11-02".to_string(),
            preferred_time: "2:00 PM".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            email: "ana@example.ph".to_string(),
            phone: "09171234567".to_string(),
            ..TestDriveRequest::default()
        }
    }

    fn financing() -> FinancingApplication {
        FinancingApplication {
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            email: "ana@example.ph".to_string(),
            phone: "09171234567".to_string(),
            birth_date: "1990-04-12".to_string(),
            address: "Maysilo, Malabon".to_string(),
            employment_status: "employed".to_string(),
            monthly_income: "85000".to_string(),
            ..FinancingApplication::default()
        }
    }

    #[tokio::test]
    async fn test_drive_requires_sign_in() {
        let (desk, gateway, notices) = desk(ok_receipt());

        let result = desk.book_test_drive(None, &booking()).await;

        assert_eq!(result, Err(LeadError::SignInRequired));
        assert_eq!(gateway.calls(), 0);
        let notice = notices.last().unwrap();
        assert_eq!(notice.title, "Sign in required");
        assert!(notice.is_destructive());
    }

    #[tokio::test]
    async fn booked_test_drive_confirms() {
        let (desk, _, notices) = desk(ok_receipt());
        let user = UserId::new("user_1").unwrap();

        assert!(desk.book_test_drive(Some(&user), &booking()).await.is_ok());
        assert_eq!(notices.titles(), vec!["Test Drive Booked!"]);
    }

    #[tokio::test]
    async fn test_drive_error_shows_server_message() {
        let (desk, _, notices) = desk(Err(ApiError::status(409, Some("Slot taken".to_string()))));
        let user = UserId::new("user_1").unwrap();

        assert!(desk.book_test_drive(Some(&user), &booking()).await.is_err());
        let notice = notices.last().unwrap();
        assert_eq!(notice.title, "Error");
        assert_eq!(notice.description.as_deref(), Some("Slot taken"));
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_gateway() {
        let (desk, gateway, notices) = desk(ok_receipt());
        let mut application = financing();
        application.email = "not-an-email".to_string();

        let result = desk.apply_for_financing(&application).await;

        assert!(matches!(result, Err(LeadError::Invalid(_))));
        assert_eq!(gateway.calls(), 0);
        assert_eq!(notices.count(), 1);
    }

    #[tokio::test]
    async fn financing_status_error_is_submission_failed() {
        let (desk, _, notices) = desk(Err(ApiError::status(500, None)));
        assert!(desk.apply_for_financing(&financing()).await.is_err());
        assert_eq!(notices.titles(), vec!["Submission failed"]);
    }

    #[tokio::test]
    async fn financing_network_error_is_something_went_wrong() {
        let (desk, _, notices) = desk(Err(ApiError::Network("refused".to_string())));
        assert!(desk.apply_for_financing(&financing()).await.is_err());
        assert_eq!(notices.titles(), vec!["Something went wrong"]);
    }

    #[tokio::test]
    async fn trade_in_failure_is_destructive() {
        let (desk, _, notices) = desk(Err(ApiError::status(500, None)));
        let submission = TradeInSubmission {
            first_name: "Ben".to_string(),
            last_name: "Cruz".to_string(),
            email: "ben@example.ph".to_string(),
            phone: "09181234567".to_string(),
            brand: "Honda".to_string(),
            model: "City".to_string(),
            year: "2018".to_string(),
            mileage: "64000".to_string(),
            ..TradeInSubmission::default()
        };

        assert!(desk.submit_trade_in(&submission, 2026).await.is_err());
        let notice = notices.last().unwrap();
        assert_eq!(notice.description.as_deref(), Some("Failed to submit your vehicle"));
        assert!(notice.is_destructive());
    }
}
