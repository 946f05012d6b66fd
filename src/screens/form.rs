use crate::catalog::{CatalogClient, CatalogError, Product, ProductPayload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { original_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Saving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Price,
    Image,
    Description,
}

pub const FORM_FIELDS: [FormField; 4] = [
    FormField::Name,
    FormField::Price,
    FormField::Image,
    FormField::Description,
];

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Price => "Price",
            FormField::Image => "Image URL",
            FormField::Description => "Description",
        }
    }
}

/// Row layout of the form screen: the four editable fields plus the
/// save entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    Field(FormField),
    Save,
}

pub const FORM_ROW_COUNT: usize = FORM_FIELDS.len() + 1;

/// Transient editable copy of a product's fields. Price stays raw text
/// until save; the user may type either `.` or `,` as the decimal
/// separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
}

impl Draft {
    fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: format_price_text(product.price),
            image: product.image.clone(),
            description: product.description.clone(),
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Price => &self.price,
            FormField::Image => &self.image,
            FormField::Description => &self.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved,
    Rejected(String),
    Failed(String),
    Ignored,
}

#[derive(Debug, Clone)]
pub struct FormController {
    pub draft: Draft,
    pub mode: FormMode,
    pub status: FormStatus,
    pub selected: usize,
}

impl FormController {
    pub fn new(product_to_edit: Option<Product>) -> Self {
        let (draft, mode) = match product_to_edit {
            Some(product) => (
                Draft::from_product(&product),
                FormMode::Edit {
                    original_id: product.id,
                },
            ),
            None => (Draft::default(), FormMode::Create),
        };
        Self {
            draft,
            mode,
            status: FormStatus::Idle,
            selected: 0,
        }
    }

    pub fn row(&self) -> FormRow {
        match FORM_FIELDS.get(self.selected) {
            Some(field) => FormRow::Field(*field),
            None => FormRow::Save,
        }
    }

    pub fn move_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_next(&mut self) {
        self.selected = std::cmp::min(self.selected + 1, FORM_ROW_COUNT - 1);
    }

    pub fn update_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.draft.name = value,
            FormField::Price => self.draft.price = value,
            FormField::Image => self.draft.image = value,
            FormField::Description => self.draft.description = value,
        }
    }

    /// Validation happens before any network traffic; a rejected draft
    /// never produces a request and leaves `status` untouched. A failed
    /// save keeps the draft so the user can retry without re-entering
    /// data.
    pub fn save(&mut self, client: &CatalogClient) -> SaveOutcome {
        if self.status == FormStatus::Saving {
            return SaveOutcome::Ignored;
        }
        let payload = match self.build_payload() {
            Ok(payload) => payload,
            Err(CatalogError::Validation(msg)) => return SaveOutcome::Rejected(msg),
            Err(err) => return SaveOutcome::Rejected(err.to_string()),
        };
        self.status = FormStatus::Saving;
        let result = match &self.mode {
            FormMode::Create => client.create(&payload),
            FormMode::Edit { original_id } => client.update(original_id, &payload),
        };
        match result {
            Ok(_) => SaveOutcome::Saved,
            Err(err) => {
                self.status = FormStatus::Idle;
                SaveOutcome::Failed(format!("failed to save product: {err}"))
            }
        }
    }

    fn build_payload(&self) -> Result<ProductPayload, CatalogError> {
        let name = self.draft.name.trim();
        if name.is_empty() {
            return Err(CatalogError::Validation(
                "name must not be empty".to_string(),
            ));
        }
        if self.draft.price.trim().is_empty() {
            return Err(CatalogError::Validation(
                "price must not be empty".to_string(),
            ));
        }
        let price = parse_price(&self.draft.price)?;
        Ok(ProductPayload {
            name: name.to_string(),
            price,
            image: self.draft.image.trim().to_string(),
            description: self.draft.description.trim().to_string(),
        })
    }
}

/// Normalizes a comma decimal separator to a period, then parses a
/// non-negative number.
pub fn parse_price(raw: &str) -> Result<f64, CatalogError> {
    let normalized = raw.trim().replace(',', ".");
    let price: f64 = normalized
        .parse()
        .map_err(|_| CatalogError::Validation(format!("price `{raw}` is not a number")))?;
    if !price.is_finite() || price < 0.0 {
        return Err(CatalogError::Validation(format!(
            "price `{raw}` must be a non-negative number"
        )));
    }
    Ok(price)
}

fn format_price_text(price: f64) -> String {
    format!("{price:.2}")
}
