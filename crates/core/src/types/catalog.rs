//! Catalog models: products, their option groups and categories.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::options::ProductOptionError;
use super::status::ProductCollection;
use crate::cart::CartProduct;

/// A named option group on a product, e.g. `Size: [S, M, L]`.
///
/// Values are unique within a group and kept in the order the admin entered them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct ProductOption {
    pub name: String,
    #[cfg_attr(feature = "postgres", sqlx(rename = "option_values"))]
    pub values: Vec<String>,
}

impl ProductOption {
    /// Build an option group, trimming the name and values.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, there are no values, a value is
    /// blank, or a value appears twice.
    pub fn new<I, S>(name: &str, values: I) -> Result<Self, ProductOptionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProductOptionError::EmptyName);
        }

        let mut cleaned: Vec<String> = Vec::new();
        for value in values {
            let value = value.as_ref().trim();
            if value.is_empty() {
                return Err(ProductOptionError::EmptyValue(name.to_owned()));
            }
            if cleaned.iter().any(|v| v == value) {
                return Err(ProductOptionError::DuplicateValue {
                    option: name.to_owned(),
                    value: value.to_owned(),
                });
            }
            cleaned.push(value.to_owned());
        }

        if cleaned.is_empty() {
            return Err(ProductOptionError::NoValues(name.to_owned()));
        }

        Ok(Self {
            name: name.to_owned(),
            values: cleaned,
        })
    }

    /// Check that no two groups share a name.
    ///
    /// # Errors
    ///
    /// Returns [`ProductOptionError::DuplicateName`] for the first repeated name.
    pub fn ensure_unique_names(options: &[Self]) -> Result<(), ProductOptionError> {
        for (i, option) in options.iter().enumerate() {
            if options.iter().skip(i + 1).any(|o| o.name == option.name) {
                return Err(ProductOptionError::DuplicateName(option.name.clone()));
            }
        }
        Ok(())
    }
}

/// A product as stored in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Option groups, loaded separately from the product row.
    #[cfg_attr(feature = "postgres", sqlx(skip))]
    #[serde(default)]
    pub options: Vec<ProductOption>,
}

impl Product {
    /// Stock as an unsigned count; negative stock is treated as none.
    #[must_use]
    pub fn available_stock(&self) -> u32 {
        u32::try_from(self.stock).unwrap_or(0)
    }

    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Snapshot of this product for a cart line.
    #[must_use]
    pub fn to_cart_product(&self, category_name: Option<String>) -> CartProduct {
        CartProduct {
            product_id: self.id,
            name: self.name.clone(),
            price: self.price,
            featured_image: self.featured_image.clone(),
            stock: self.available_stock(),
            category_name,
        }
    }
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Minimal category reference embedded in product listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// Derive a URL slug from a name: lowercase ASCII alphanumerics separated by
/// single dashes.
///
/// ```
/// use shilpini_core::slugify;
///
/// assert_eq!(slugify("Jamdani Sarees & More"), "jamdani-sarees-more");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_option_trims_and_keeps_order() {
        let opt = ProductOption::new(" Size ", [" S", "M ", "L"]).unwrap();
        assert_eq!(opt.name, "Size");
        assert_eq!(opt.values, vec!["S", "M", "L"]);
    }

    #[test]
    fn test_option_rejects_duplicate_values() {
        assert_eq!(
            ProductOption::new("Size", ["M", "M"]),
            Err(ProductOptionError::DuplicateValue {
                option: "Size".to_owned(),
                value: "M".to_owned(),
            })
        );
    }

    #[test]
    fn test_option_rejects_empty_parts() {
        assert_eq!(
            ProductOption::new("  ", ["S"]),
            Err(ProductOptionError::EmptyName)
        );
        assert_eq!(
            ProductOption::new("Size", Vec::<String>::new()),
            Err(ProductOptionError::NoValues("Size".to_owned()))
        );
        assert_eq!(
            ProductOption::new("Size", ["S", " "]),
            Err(ProductOptionError::EmptyValue("Size".to_owned()))
        );
    }

    #[test]
    fn test_option_group_names_unique() {
        let groups = vec![
            ProductOption::new("Size", ["S"]).unwrap(),
            ProductOption::new("Size", ["M"]).unwrap(),
        ];
        assert_eq!(
            ProductOption::ensure_unique_names(&groups),
            Err(ProductOptionError::DuplicateName("Size".to_owned()))
        );
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Three-Piece Sets"), "three-piece-sets");
        assert_eq!(slugify("  --Kurti!! "), "kurti");
        assert_eq!(slugify("Saree 2024"), "saree-2024");
        assert_eq!(slugify("!!!"), "");
    }
}
