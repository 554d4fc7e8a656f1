//! LeadGateway port for customer submissions

use async_trait::async_trait;

use super::ApiError;
use crate::domain::leads::{
    FinancingApplication, LeadReceipt, TestDriveRequest, TradeInSubmission,
};

/// Submits customer leads to the backend.
#[async_trait]
pub trait LeadGateway: Send + Sync {
    async fn book_test_drive(&self, request: &TestDriveRequest) -> Result<LeadReceipt, ApiError>;

    async fn apply_for_financing(
        &self,
        application: &FinancingApplication,
    ) -> Result<LeadReceipt, ApiError>;

    async fn submit_trade_in(
        &self,
        submission: &TradeInSubmission,
    ) -> Result<LeadReceipt, ApiError>;
}
