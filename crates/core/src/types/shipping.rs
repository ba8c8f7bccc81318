//! Shipping rates, delivery districts and delivery location.
//!
//! Delivery is priced in two tiers: inside the reference city (Dhaka) and
//! everywhere else. The district a customer picks at checkout decides the tier.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price::MAX_AMOUNT;

/// The district whose deliveries are charged the inside rate.
pub const REFERENCE_CITY: &str = "Dhaka";

/// All 64 districts of Bangladesh, alphabetically.
pub const DISTRICTS: [&str; 64] = [
    "Bagerhat",
    "Bandarban",
    "Barguna",
    "Barishal",
    "Bhola",
    "Bogura",
    "Brahmanbaria",
    "Chandpur",
    "Chapainawabganj",
    "Chattogram",
    "Chuadanga",
    "Cox's Bazar",
    "Cumilla",
    "Dhaka",
    "Dinajpur",
    "Faridpur",
    "Feni",
    "Gaibandha",
    "Gazipur",
    "Gopalganj",
    "Habiganj",
    "Jamalpur",
    "Jashore",
    "Jhalokati",
    "Jhenaidah",
    "Joypurhat",
    "Khagrachhari",
    "Khulna",
    "Kishoreganj",
    "Kurigram",
    "Kushtia",
    "Lakshmipur",
    "Lalmonirhat",
    "Madaripur",
    "Magura",
    "Manikganj",
    "Meherpur",
    "Moulvibazar",
    "Munshiganj",
    "Mymensingh",
    "Naogaon",
    "Narail",
    "Narayanganj",
    "Narsingdi",
    "Natore",
    "Netrokona",
    "Nilphamari",
    "Noakhali",
    "Pabna",
    "Panchagarh",
    "Patuakhali",
    "Pirojpur",
    "Rajbari",
    "Rajshahi",
    "Rangamati",
    "Rangpur",
    "Satkhira",
    "Shariatpur",
    "Sherpur",
    "Sirajganj",
    "Sunamganj",
    "Sylhet",
    "Tangail",
    "Thakurgaon",
];

/// Errors for the shipping-rate settings form.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShippingRateError {
    #[error("Inside Dhaka shipping must be a positive number")]
    InsideNotPositive,
    #[error("Outside Dhaka shipping must be a positive number")]
    OutsideNotPositive,
    #[error("Inside Dhaka shipping must be at most 99999999.99")]
    InsideTooLarge,
    #[error("Outside Dhaka shipping must be at most 99999999.99")]
    OutsideTooLarge,
}

/// The two shipping charges stored in the settings singleton.
///
/// Only built through [`ShippingRates::new`] or from a stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ShippingRates {
    /// Charge for deliveries inside the reference city.
    #[serde(rename = "insideDhakaShipping")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "inside_dhaka_shipping"))]
    pub inside: Decimal,
    /// Charge for deliveries anywhere else.
    #[serde(rename = "outsideDhakaShipping")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "outside_dhaka_shipping"))]
    pub outside: Decimal,
}

impl Default for ShippingRates {
    fn default() -> Self {
        Self {
            inside: Decimal::from(70),
            outside: Decimal::from(180),
        }
    }
}

impl ShippingRates {
    /// Validate and build a pair of rates.
    ///
    /// # Errors
    ///
    /// Returns the error for the first rate that is not strictly positive
    /// or does not fit the money column once rounded to two places.
    pub fn new(inside: Decimal, outside: Decimal) -> Result<Self, ShippingRateError> {
        let inside = inside.round_dp(2);
        let outside = outside.round_dp(2);
        if inside <= Decimal::ZERO {
            return Err(ShippingRateError::InsideNotPositive);
        }
        if inside > MAX_AMOUNT {
            return Err(ShippingRateError::InsideTooLarge);
        }
        if outside <= Decimal::ZERO {
            return Err(ShippingRateError::OutsideNotPositive);
        }
        if outside > MAX_AMOUNT {
            return Err(ShippingRateError::OutsideTooLarge);
        }
        Ok(Self { inside, outside })
    }

    /// Parse both rates from form input.
    ///
    /// Non-numeric input is reported with the same field-specific error as a
    /// non-positive value.
    ///
    /// # Errors
    ///
    /// Returns the error for the first field that is not a positive number.
    pub fn parse(inside: &str, outside: &str) -> Result<Self, ShippingRateError> {
        let inside = Decimal::from_str(inside.trim())
            .map_err(|_| ShippingRateError::InsideNotPositive)?;
        let outside = Decimal::from_str(outside.trim())
            .map_err(|_| ShippingRateError::OutsideNotPositive)?;
        Self::new(inside, outside)
    }

    /// The charge for a delivery location.
    #[must_use]
    pub const fn rate_for(&self, location: DeliveryLocation) -> Decimal {
        match location {
            DeliveryLocation::Inside => self.inside,
            DeliveryLocation::Outside => self.outside,
        }
    }
}

/// Whether a delivery goes inside or outside the reference city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryLocation {
    #[default]
    Inside,
    Outside,
}

impl DeliveryLocation {
    /// Resolve the location to charge for.
    ///
    /// A chosen district forces the tier: the reference city is always
    /// inside, every other district is always outside. Without a district the
    /// customer's own choice stands, defaulting to inside.
    #[must_use]
    pub fn resolve(district: Option<&District>, requested: Option<Self>) -> Self {
        match district {
            Some(d) if d.is_reference_city() => Self::Inside,
            Some(_) => Self::Outside,
            None => requested.unwrap_or_default(),
        }
    }
}

/// Error for a district name that is not in [`DISTRICTS`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Please select a valid district")]
pub struct DistrictError;

/// A district from the fixed list, with canonical spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct District(&'static str);

impl District {
    /// Look up a district by name, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`DistrictError`] if the name is not a known district.
    pub fn parse(name: &str) -> Result<Self, DistrictError> {
        let name = name.trim();
        DISTRICTS
            .iter()
            .find(|d| d.eq_ignore_ascii_case(name))
            .map(|&d| Self(d))
            .ok_or(DistrictError)
    }

    /// Canonical district name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0
    }

    /// Whether this is the reference city.
    #[must_use]
    pub fn is_reference_city(&self) -> bool {
        self.0 == REFERENCE_CITY
    }
}

impl std::fmt::Display for District {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}
