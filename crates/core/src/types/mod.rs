//! Core types for Shilpini.
//!
//! This module provides type-safe wrappers and domain models for the shop.

pub mod catalog;
pub mod content;
pub mod id;
pub mod options;
pub mod order;
pub mod phone;
pub mod price;
pub mod shipping;
pub mod status;

pub use catalog::{Category, CategoryRef, Product, ProductOption, slugify};
pub use content::{Review, SliderContent};
pub use id::*;
pub use options::{OptionSelectionError, ProductOptionError, SelectedOptions};
pub use order::{
    NewOrder, NewOrderItem, ORDER_NUMBER_BASE, ORDER_NUMBER_PREFIX, Order, OrderItem, order_number,
};
pub use phone::{Phone, PhoneError};
pub use price::{CurrencyCode, MAX_AMOUNT, Price, format_amount};
pub use shipping::{
    DeliveryLocation, District, DistrictError, REFERENCE_CITY, ShippingRateError, ShippingRates,
};
pub use status::*;
