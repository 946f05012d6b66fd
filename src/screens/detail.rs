use crate::catalog::{CatalogClient, CatalogError, Product};
use crate::screens::navigation::{NavRequest, ScreenRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailStatus {
    Idle,
    Loading,
    Deleting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted,
    Failed(String),
    Ignored,
}

/// One product's current data, seeded from the navigation payload. The
/// payload is already a reasonable product to display, so the refresh on
/// focus is soft: a failure keeps the existing copy and stays quiet.
#[derive(Debug, Clone)]
pub struct DetailController {
    pub current: Product,
    pub status: DetailStatus,
    pub confirming_delete: bool,
}

impl DetailController {
    pub fn new(product: Product) -> Self {
        Self {
            current: product,
            status: DetailStatus::Idle,
            confirming_delete: false,
        }
    }

    /// Soft reload. Corrects staleness left by an edit performed via the
    /// form screen and returned from. The caller logs a failure; it must
    /// not surface a notification.
    pub fn on_focus_gained(&mut self, client: &CatalogClient) -> Result<(), CatalogError> {
        if self.status != DetailStatus::Idle {
            return Ok(());
        }
        self.status = DetailStatus::Loading;
        let result = client.get(&self.current.id);
        self.status = DetailStatus::Idle;
        match result {
            Ok(fresh) => {
                self.current = fresh;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    pub fn request_edit(&self) -> NavRequest {
        NavRequest::Push(ScreenRequest::Form {
            product_to_edit: Some(self.current.clone()),
        })
    }

    /// Raises the confirm dialog; nothing is deleted until the user
    /// answers yes. Ignored while a delete is already in flight.
    pub fn request_delete(&mut self) {
        if self.status == DetailStatus::Deleting {
            return;
        }
        self.confirming_delete = true;
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    pub fn confirm_delete(&mut self, client: &CatalogClient) -> DeleteOutcome {
        if self.status == DetailStatus::Deleting {
            return DeleteOutcome::Ignored;
        }
        self.confirming_delete = false;
        self.status = DetailStatus::Deleting;
        match client.delete(&self.current.id) {
            Ok(()) => DeleteOutcome::Deleted,
            Err(err) => {
                // The product is NOT assumed deleted on failure.
                self.status = DetailStatus::Idle;
                DeleteOutcome::Failed(format!("failed to delete product: {err}"))
            }
        }
    }
}
