//! Back-office form payloads and their validation.
//!
//! Each `*Form` is the JSON body the admin UI submits. `validate` trims text,
//! turns blank optional fields into `None` and returns the `*Input` the
//! repositories persist.

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use shilpini_core::{
    CategoryId, MAX_AMOUNT, ProductCollection, ProductId, ProductOption, ProductOptionError,
    Review, ShippingRateError, ShippingRates, slugify,
};

/// Why a submitted form was rejected. Messages are shown to the admin as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Name is required")]
    MissingName,
    #[error("Price must be greater than 0")]
    InvalidPrice,
    #[error("Compare price must be greater than 0")]
    InvalidComparePrice,
    #[error("Price must be at most 99999999.99")]
    PriceTooLarge,
    #[error("Compare price must be at most 99999999.99")]
    ComparePriceTooLarge,
    #[error("Stock cannot be negative")]
    NegativeStock,
    #[error("Invalid product option: {0}")]
    Option(#[from] ProductOptionError),
    #[error("Slug must contain letters or numbers")]
    InvalidSlug,
    #[error("Image is required")]
    MissingImage,
    #[error("Rating must be between 1 and 5")]
    InvalidRating,
    #[error("Comment is required")]
    MissingComment,
    #[error(transparent)]
    Shipping(#[from] ShippingRateError),
}

const fn default_true() -> bool {
    true
}

/// Trim an optional text field; blank becomes `None`.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Trim a list of text values, dropping blanks.
fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .collect()
}

fn required(value: &str, err: FormError) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(err)
    } else {
        Ok(value.to_owned())
    }
}

// =============================================================================
// Products
// =============================================================================

/// One option group as entered in the product form.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionForm {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub compare_price: Option<Decimal>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub collections: Vec<ProductCollection>,
    #[serde(default, alias = "order")]
    pub sort_order: i32,
    /// `None` leaves existing option groups untouched on update.
    #[serde(default)]
    pub options: Option<Vec<OptionForm>>,
}

/// A validated product ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub compare_price: Option<Decimal>,
    pub sku: Option<String>,
    pub stock: i32,
    pub category_id: Option<CategoryId>,
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    pub images: Vec<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub collections: Vec<ProductCollection>,
    pub sort_order: i32,
    pub options: Option<Vec<ProductOption>>,
}

impl ProductForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] found.
    pub fn validate(self) -> Result<ProductInput, FormError> {
        let name = required(&self.name, FormError::MissingName)?;
        let price = self.price.round_dp(2);
        if price <= Decimal::ZERO {
            return Err(FormError::InvalidPrice);
        }
        if price > MAX_AMOUNT {
            return Err(FormError::PriceTooLarge);
        }
        let compare_price = self.compare_price.map(|p| p.round_dp(2));
        if compare_price.is_some_and(|p| p <= Decimal::ZERO) {
            return Err(FormError::InvalidComparePrice);
        }
        if compare_price.is_some_and(|p| p > MAX_AMOUNT) {
            return Err(FormError::ComparePriceTooLarge);
        }
        if self.stock < 0 {
            return Err(FormError::NegativeStock);
        }

        let options = self
            .options
            .map(|groups| {
                let options = groups
                    .iter()
                    .map(|g| ProductOption::new(&g.name, &g.values))
                    .collect::<Result<Vec<_>, _>>()?;
                ProductOption::ensure_unique_names(&options)?;
                Ok::<_, ProductOptionError>(options)
            })
            .transpose()?;

        let mut collections = self.collections;
        collections.sort_by_key(|c| c.as_str());
        collections.dedup();

        Ok(ProductInput {
            name,
            description: clean(self.description),
            price,
            compare_price,
            sku: clean(self.sku),
            stock: self.stock,
            category_id: self.category_id,
            tags: clean_list(self.tags),
            featured_image: clean(self.featured_image),
            images: clean_list(self.images),
            is_active: self.is_active,
            is_featured: self.is_featured,
            collections,
            sort_order: self.sort_order,
            options,
        })
    }
}

// =============================================================================
// Categories
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    pub name: String,
    /// Derived from the name when blank.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, alias = "order")]
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

impl CategoryForm {
    /// Validate the form, deriving the slug from the name when none is given.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] found.
    pub fn validate(self) -> Result<CategoryInput, FormError> {
        let name = required(&self.name, FormError::MissingName)?;
        let slug = slugify(clean(self.slug).as_deref().unwrap_or(&name));
        if slug.is_empty() {
            return Err(FormError::InvalidSlug);
        }

        Ok(CategoryInput {
            name,
            slug,
            description: clean(self.description),
            image: clean(self.image),
            is_active: self.is_active,
            sort_order: self.sort_order,
        })
    }
}

// =============================================================================
// Sliders
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub phone_image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub button_text: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, alias = "order")]
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: String,
    pub phone_image: Option<String>,
    pub link: Option<String>,
    pub button_text: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

impl SliderForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns `FormError::MissingImage` when no image URL is given.
    pub fn validate(self) -> Result<SliderInput, FormError> {
        Ok(SliderInput {
            image: required(&self.image, FormError::MissingImage)?,
            title: clean(self.title),
            description: clean(self.description),
            phone_image: clean(self.phone_image),
            link: clean(self.link),
            button_text: clean(self.button_text),
            is_active: self.is_active,
            sort_order: self.sort_order,
        })
    }
}

// =============================================================================
// Reviews
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewForm {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    pub user_name: String,
    #[serde(default)]
    pub user_email: Option<String>,
    pub rating: i16,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub screenshot_image: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub is_showcase: bool,
    #[serde(default)]
    pub is_approved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewInput {
    pub product_id: Option<ProductId>,
    pub user_name: String,
    pub user_email: Option<String>,
    pub rating: i16,
    pub comment: String,
    pub image: Option<String>,
    pub screenshot_image: Option<String>,
    pub source: Option<String>,
    pub is_showcase: bool,
    pub is_approved: bool,
}

impl ReviewForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] found.
    pub fn validate(self) -> Result<ReviewInput, FormError> {
        let user_name = required(&self.user_name, FormError::MissingName)?;
        if !Review::is_valid_rating(self.rating) {
            return Err(FormError::InvalidRating);
        }
        let comment = required(&self.comment, FormError::MissingComment)?;

        Ok(ReviewInput {
            product_id: self.product_id,
            user_name,
            user_email: clean(self.user_email),
            rating: self.rating,
            comment,
            image: clean(self.image),
            screenshot_image: clean(self.screenshot_image),
            source: clean(self.source),
            is_showcase: self.is_showcase,
            is_approved: self.is_approved,
        })
    }
}

// =============================================================================
// Settings
// =============================================================================

/// A rate as typed in the settings form: a JSON number or numeric text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RateInput {
    Number(serde_json::Number),
    Text(String),
}

impl RateInput {
    fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingForm {
    pub inside_dhaka_shipping: RateInput,
    pub outside_dhaka_shipping: RateInput,
}

impl ShippingForm {
    /// Parse both rates.
    ///
    /// # Errors
    ///
    /// Returns the field-specific [`ShippingRateError`] for the first rate
    /// that is not a positive number.
    pub fn validate(&self) -> Result<ShippingRates, FormError> {
        Ok(ShippingRates::parse(
            &self.inside_dhaka_shipping.as_text(),
            &self.outside_dhaka_shipping.as_text(),
        )?)
    }
}
