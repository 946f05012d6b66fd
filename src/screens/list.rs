use crate::catalog::{CatalogClient, CatalogError, Product};
use crate::screens::navigation::{NavRequest, ScreenRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Idle,
    Loading,
    Error,
}

/// The visible product collection. The items vector is the only copy of
/// the list this screen owns; it is replaced wholesale on every
/// successful reload and deliberately left alone on a failed one.
#[derive(Debug, Clone)]
pub struct ListController {
    pub items: Vec<Product>,
    pub status: ListStatus,
    pub selected: usize,
}

impl Default for ListController {
    fn default() -> Self {
        Self::new()
    }
}

impl ListController {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            status: ListStatus::Idle,
            selected: 0,
        }
    }

    /// Reload-on-focus: mutations happen on other screens and there is
    /// no push channel back, so regaining focus is the only signal that
    /// the collection may have changed.
    pub fn on_focus_gained(&mut self, client: &CatalogClient) -> Result<(), CatalogError> {
        self.status = ListStatus::Loading;
        match client.list() {
            Ok(items) => {
                self.items = items;
                self.status = ListStatus::Idle;
                self.clamp_selection();
                Ok(())
            }
            Err(err) => {
                // Stale-but-available: keep showing the last good list.
                self.status = ListStatus::Error;
                Err(err)
            }
        }
    }

    pub fn on_manual_refresh(&mut self, client: &CatalogClient) -> Result<(), CatalogError> {
        self.on_focus_gained(client)
    }

    pub fn select_product(&self) -> NavRequest {
        match self.items.get(self.selected) {
            Some(product) => NavRequest::Push(ScreenRequest::Detail {
                product: product.clone(),
            }),
            None => NavRequest::None,
        }
    }

    pub fn request_create(&self) -> NavRequest {
        NavRequest::Push(ScreenRequest::Form {
            product_to_edit: None,
        })
    }

    pub fn move_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = std::cmp::min(self.selected + 1, self.items.len() - 1);
        }
    }

    fn clamp_selection(&mut self) {
        if self.items.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(self.items.len() - 1);
        }
    }
}
