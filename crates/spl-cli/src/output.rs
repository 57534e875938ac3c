//! CSV output streams.
//!
//! Every row is flushed as soon as it is written so an interrupted run
//! keeps everything resolved up to that point.

use std::io::Write;

use spl_core::{EntityId, ResolutionResult, SponsorQuery};

use crate::openfda::Product;

const RESOLVE_HEADERS: [&str; 7] = [
    "nct_id",
    "company",
    "ticker",
    "exchange",
    "status",
    "wikidata_uri",
    "path",
];

const PRODUCT_HEADERS: [&str; 12] = [
    "product_name",
    "active_ingredients_name",
    "active_ingredients_strength",
    "rxcui",
    "marketing_status",
    "dosage_form",
    "openfda_sponsor_name",
    "resolved_sponsor_name",
    "ticker",
    "exchange",
    "status",
    "wikidata_uri",
];

const UNRESOLVED_HEADERS: [&str; 2] = ["key", "sponsor_name"];

fn ticker_column(result: &ResolutionResult) -> &str {
    result.ticker.as_deref().unwrap_or("N/A")
}

fn exchange_column(result: &ResolutionResult) -> &str {
    result.exchange.as_deref().unwrap_or("N/A")
}

fn path_column(result: &ResolutionResult) -> String {
    result
        .path
        .iter()
        .map(EntityId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// The seven columns of one `resolve` output row.
pub fn resolve_record(result: &ResolutionResult) -> [String; 7] {
    [
        result.query.key.clone(),
        result.company.clone(),
        ticker_column(result).to_string(),
        exchange_column(result).to_string(),
        result.status.as_str().to_string(),
        result.source_uri.clone().unwrap_or_default(),
        path_column(result),
    ]
}

/// One `extract` output row: product columns joined with the sponsor's
/// resolution.
pub fn product_record(product: &Product, result: &ResolutionResult) -> [String; 12] {
    [
        product.product_name.clone(),
        product.active_ingredients_name.clone(),
        product.active_ingredients_strength.clone(),
        product.rxcui.clone(),
        product.marketing_status.clone(),
        product.dosage_form.clone(),
        result.query.raw_name.clone(),
        result.company.clone(),
        ticker_column(result).to_string(),
        exchange_column(result).to_string(),
        result.status.as_str().to_string(),
        result.source_uri.clone().unwrap_or_default(),
    ]
}

pub struct ResolveWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> ResolveWriter<W> {
    pub fn new(writer: W) -> anyhow::Result<Self> {
        let mut inner = csv::Writer::from_writer(writer);
        inner.write_record(RESOLVE_HEADERS)?;
        inner.flush()?;
        Ok(Self { inner })
    }

    pub fn write(&mut self, result: &ResolutionResult) -> anyhow::Result<()> {
        self.inner.write_record(resolve_record(result))?;
        self.inner.flush()?;
        Ok(())
    }
}

pub struct ProductWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> ProductWriter<W> {
    pub fn new(writer: W) -> anyhow::Result<Self> {
        let mut inner = csv::Writer::from_writer(writer);
        inner.write_record(PRODUCT_HEADERS)?;
        inner.flush()?;
        Ok(Self { inner })
    }

    pub fn write(&mut self, product: &Product, result: &ResolutionResult) -> anyhow::Result<()> {
        self.inner.write_record(product_record(product, result))?;
        self.inner.flush()?;
        Ok(())
    }
}

/// Diagnostic stream of queries that ended unresolved.
pub struct UnresolvedWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> UnresolvedWriter<W> {
    pub fn new(writer: W) -> anyhow::Result<Self> {
        let mut inner = csv::Writer::from_writer(writer);
        inner.write_record(UNRESOLVED_HEADERS)?;
        inner.flush()?;
        Ok(Self { inner })
    }

    pub fn write(&mut self, query: &SponsorQuery) -> anyhow::Result<()> {
        self.inner
            .write_record([query.key.as_str(), query.raw_name.as_str()])?;
        self.inner.flush()?;
        Ok(())
    }
}
