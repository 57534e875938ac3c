//! OpenFDA drugsfda dump parsing.
//!
//! The dump is one JSON object with a `results` array of application
//! records. Each record carries a sponsor name, its products, and an
//! `openfda` enrichment block with RxCUI codes and sometimes better brand
//! names than the product entries themselves.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DrugsFdaDump {
    #[serde(default)]
    pub results: Vec<ApplicationRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationRecord {
    #[serde(default)]
    pub sponsor_name: Option<String>,
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub openfda: OpenFdaBlock,
}

#[derive(Debug, Default, Deserialize)]
pub struct OpenFdaBlock {
    #[serde(default)]
    pub brand_name: Vec<String>,
    #[serde(default)]
    pub rxcui: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub active_ingredients: Vec<ActiveIngredient>,
    #[serde(default)]
    pub marketing_status: Option<String>,
    #[serde(default)]
    pub dosage_form: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActiveIngredient {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub strength: Option<String>,
}

/// One flattened output row's product half.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub product_name: String,
    pub active_ingredients_name: String,
    pub active_ingredients_strength: String,
    pub rxcui: String,
    pub marketing_status: String,
    pub dosage_form: String,
}

pub fn read_dump(path: &Path) -> anyhow::Result<DrugsFdaDump> {
    let file = File::open(path)
        .with_context(|| format!("failed to open OpenFDA dump {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse OpenFDA dump {}", path.display()))
}

/// Group flattened products by sponsor name, preserving first-seen
/// sponsor order. Records without a sponsor land under `UNKNOWN`.
pub fn group_by_sponsor(dump: DrugsFdaDump) -> Vec<(String, Vec<Product>)> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: std::collections::HashMap<String, Vec<Product>> =
        std::collections::HashMap::new();

    for record in dump.results {
        let sponsor = record
            .sponsor_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "UNKNOWN".to_string());
        let rxcui = record.openfda.rxcui.join("; ");

        let products: Vec<Product> = record
            .products
            .into_iter()
            .enumerate()
            .map(|(i, product)| flatten(product, i, &record.openfda.brand_name, &rxcui))
            .collect();
        if products.is_empty() {
            continue;
        }

        let entry = groups.entry(sponsor.clone()).or_default();
        if entry.is_empty() {
            order.push(sponsor);
        }
        entry.extend(products);
    }

    order
        .into_iter()
        .map(|sponsor| {
            let products = groups.remove(&sponsor).unwrap_or_default();
            (sponsor, products)
        })
        .collect()
}

fn flatten(product: ProductRecord, index: usize, fda_brands: &[String], rxcui: &str) -> Product {
    let mut brand = product.brand_name.unwrap_or_default();
    // The openfda block sometimes has the brand name the product entry lacks.
    if (brand.is_empty() || brand == "Unknown") && index < fda_brands.len() {
        brand = fda_brands[index].clone();
    }
    if brand.is_empty() {
        brand = "Unknown".to_string();
    }

    let names: Vec<&str> = product
        .active_ingredients
        .iter()
        .filter_map(|ai| ai.name.as_deref())
        .collect();
    let strengths: Vec<&str> = product
        .active_ingredients
        .iter()
        .filter_map(|ai| ai.strength.as_deref())
        .collect();

    Product {
        product_name: brand,
        active_ingredients_name: names.join("; "),
        active_ingredients_strength: strengths.join("; "),
        rxcui: rxcui.to_string(),
        marketing_status: product
            .marketing_status
            .unwrap_or_else(|| "Unknown".to_string()),
        dosage_form: product.dosage_form.unwrap_or_else(|| "Unknown".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DUMP_FIXTURE: &str = r#"{
        "results": [
            {
                "sponsor_name": "PFIZER",
                "products": [
                    {
                        "brand_name": "LIPITOR",
                        "active_ingredients": [
                            {"name": "ATORVASTATIN CALCIUM", "strength": "10MG"},
                            {"name": "EXCIPIENT X", "strength": "5MG"}
                        ],
                        "marketing_status": "Prescription",
                        "dosage_form": "TABLET"
                    }
                ],
                "openfda": {"rxcui": ["617310", "617312"]}
            },
            {
                "sponsor_name": "WYETH",
                "products": [
                    {
                        "brand_name": "",
                        "active_ingredients": [{"name": "PANTOPRAZOLE", "strength": "40MG"}],
                        "marketing_status": "Discontinued",
                        "dosage_form": "TABLET"
                    }
                ],
                "openfda": {"brand_name": ["PROTONIX"]}
            },
            {
                "sponsor_name": "PFIZER",
                "products": [
                    {
                        "brand_name": "NORVASC",
                        "active_ingredients": [{"name": "AMLODIPINE", "strength": "5MG"}]
                    }
                ]
            },
            {
                "sponsor_name": "NO PRODUCTS LLC",
                "products": []
            }
        ]
    }"#;

    fn fixture_groups() -> Vec<(String, Vec<Product>)> {
        let dump: DrugsFdaDump = serde_json::from_str(DUMP_FIXTURE).expect("fixture parses");
        group_by_sponsor(dump)
    }

    #[test]
    fn groups_products_by_sponsor_in_first_seen_order() {
        let groups = fixture_groups();
        let sponsors: Vec<&str> = groups.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(sponsors, vec!["PFIZER", "WYETH"]);
        assert_eq!(groups[0].1.len(), 2, "both Pfizer applications merge");
    }

    #[test]
    fn ingredients_join_into_parallel_columns() {
        let groups = fixture_groups();
        let lipitor = &groups[0].1[0];
        assert_eq!(lipitor.product_name, "LIPITOR");
        assert_eq!(
            lipitor.active_ingredients_name,
            "ATORVASTATIN CALCIUM; EXCIPIENT X"
        );
        assert_eq!(lipitor.active_ingredients_strength, "10MG; 5MG");
        assert_eq!(lipitor.rxcui, "617310; 617312");
    }

    #[test]
    fn missing_brand_name_falls_back_to_openfda_block() {
        let groups = fixture_groups();
        let protonix = &groups[1].1[0];
        assert_eq!(protonix.product_name, "PROTONIX");
        assert_eq!(protonix.marketing_status, "Discontinued");
    }

    #[test]
    fn missing_optional_fields_default_to_unknown() {
        let groups = fixture_groups();
        let norvasc = &groups[0].1[1];
        assert_eq!(norvasc.marketing_status, "Unknown");
        assert_eq!(norvasc.dosage_form, "Unknown");
        assert_eq!(norvasc.rxcui, "");
    }

    #[test]
    fn sponsors_without_products_are_dropped() {
        let groups = fixture_groups();
        assert!(!groups.iter().any(|(s, _)| s == "NO PRODUCTS LLC"));
    }
}
