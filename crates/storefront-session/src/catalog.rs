//! # Catalog & Coupon Book
//!
//! In-memory product catalog and coupon book for one session, with the
//! admin operations that edit them.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Admin view ──► NewProduct / ProductUpdate ──► validate ──► catalog     │
//! │                                                     │                   │
//! │                                               ValidationError           │
//! │                                                                         │
//! │  Catalog view ◄── search(term) ◄── products in insertion order          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use storefront_core::validation::{
    validate_coupon, validate_discount_tiers, validate_name, validate_price, validate_product,
    validate_search_query, validate_stock,
};
use storefront_core::{Coupon, DiscountRate, DiscountTier, Money, Product};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{SessionError, SessionResult};

// =============================================================================
// Admin Inputs
// =============================================================================

/// Input for creating a product. The id is generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub stock: i64,
    #[serde(default)]
    pub discounts: Vec<DiscountTier>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_recommended: bool,
}

/// Partial product edit; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<i64>,
    pub discounts: Option<Vec<DiscountTier>>,
    pub description: Option<String>,
    pub is_recommended: Option<bool>,
}

// =============================================================================
// Product Catalog
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        ProductCatalog { products }
    }

    /// Parses a JSON array of products. Every product is validated the
    /// same way admin input is; the first invalid one fails the load.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_session::ProductCatalog;
    ///
    /// let catalog = ProductCatalog::from_json(
    ///     r#"[{"id":"p1","name":"Widget","price":1000,"stock":5,
    ///          "discounts":[{"minQuantity":10,"rate":0.1}]}]"#,
    /// ).unwrap();
    /// assert_eq!(catalog.get("p1").unwrap().discounts[0].rate.bps(), 1000);
    /// ```
    pub fn from_json(json: &str) -> SessionResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        for product in &products {
            validate_product(product)?;
        }
        Ok(ProductCatalog { products })
    }

    /// The three seed products of the reference storefront.
    pub fn storefront_defaults() -> Self {
        let rate = DiscountRate::from_fraction;
        ProductCatalog::new(vec![
            Product::new("p1", "Product 1", Money::from_minor(10_000), 20)
                .with_discounts(vec![
                    DiscountTier::new(10, rate(0.1)),
                    DiscountTier::new(20, rate(0.2)),
                ])
                .with_description("Best-selling item"),
            {
                let mut p = Product::new("p2", "Product 2", Money::from_minor(20_000), 20)
                    .with_discounts(vec![DiscountTier::new(10, rate(0.15))])
                    .with_description("Recommended item");
                p.is_recommended = true;
                p
            },
            Product::new("p3", "Product 3", Money::from_minor(30_000), 20)
                .with_discounts(vec![
                    DiscountTier::new(10, rate(0.2)),
                    DiscountTier::new(30, rate(0.25)),
                ])
                .with_description("Premium item"),
        ])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Case-insensitive substring match on name and description.
    /// A blank term returns every product.
    pub fn search(&self, term: &str) -> SessionResult<Vec<&Product>> {
        let term = validate_search_query(term)?.to_lowercase();

        if term.is_empty() {
            return Ok(self.products.iter().collect());
        }

        Ok(self
            .products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&term)
                    || p
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&term))
            })
            .collect())
    }

    /// Validates and appends a new product with a fresh id.
    pub fn add_product(&mut self, input: NewProduct) -> SessionResult<Product> {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            price: input.price,
            stock: input.stock,
            discounts: input.discounts,
            description: input.description,
            is_recommended: input.is_recommended,
        };

        validate_product(&product)?;
        self.products.push(product.clone());
        Ok(product)
    }

    /// Applies a partial edit. Nothing changes if any field is invalid.
    pub fn update_product(&mut self, id: &str, update: ProductUpdate) -> SessionResult<Product> {
        if let Some(name) = &update.name {
            validate_name("name", name)?;
        }
        if let Some(price) = update.price {
            validate_price(price.minor())?;
        }
        if let Some(stock) = update.stock {
            validate_stock(stock)?;
        }
        if let Some(tiers) = &update.discounts {
            validate_discount_tiers(tiers)?;
        }

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| SessionError::ProductNotFound(id.to_string()))?;

        if let Some(name) = update.name {
            product.name = name.trim().to_string();
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(stock) = update.stock {
            product.stock = stock;
        }
        if let Some(tiers) = update.discounts {
            product.discounts = tiers;
        }
        if let Some(description) = update.description {
            product.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(flag) = update.is_recommended {
            product.is_recommended = flag;
        }

        Ok(product.clone())
    }

    pub fn delete_product(&mut self, id: &str) -> SessionResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| SessionError::ProductNotFound(id.to_string()))?;
        Ok(self.products.remove(index))
    }
}

// =============================================================================
// Coupon Book
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouponBook {
    coupons: Vec<Coupon>,
}

impl CouponBook {
    pub fn new(coupons: Vec<Coupon>) -> Self {
        CouponBook { coupons }
    }

    /// One amount coupon and one percentage coupon.
    pub fn storefront_defaults() -> Self {
        CouponBook::new(vec![
            Coupon::amount("5000 off", "AMOUNT5000", Money::from_minor(5_000)),
            Coupon::percentage("10% off", "PERCENT10", DiscountRate::from_fraction(0.1)),
        ])
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    pub fn find(&self, code: &str) -> Option<&Coupon> {
        storefront_core::find_coupon(code, &self.coupons)
    }

    pub fn add_coupon(&mut self, coupon: Coupon) -> SessionResult<()> {
        let coupon = Coupon {
            code: coupon.code.trim().to_string(),
            name: coupon.name.trim().to_string(),
            ..coupon
        };
        validate_coupon(&coupon)?;

        if self.find(&coupon.code).is_some() {
            return Err(SessionError::DuplicateCoupon(coupon.code));
        }

        self.coupons.push(coupon);
        Ok(())
    }

    pub fn delete_coupon(&mut self, code: &str) -> SessionResult<Coupon> {
        let index = self
            .coupons
            .iter()
            .position(|c| c.matches_code(code))
            .ok_or_else(|| SessionError::CouponNotFound(code.to_string()))?;
        Ok(self.coupons.remove(index))
    }
}
