//! Integration tests for `expand_catalog` over a full Shopify product-CSV
//! header and the default export profile.
//!
//! Fixtures are built in memory; each test covers one batch scenario or one
//! error that aborts a batch.

use std::collections::HashMap;

use catex_core::ExportProfile;
use catex_engine::{expand_catalog, EngineError, ExpandSettings, Expansion, Table};

const SHOPIFY_HEADERS: &[&str] = &[
    "Handle",
    "Title",
    "Body (HTML)",
    "Vendor",
    "Standardized Product Type",
    "Custom Product Type",
    "Tags",
    "Published",
    "Option1 Name",
    "Option1 Value",
    "Option2 Name",
    "Option2 Value",
    "Option3 Name",
    "Option3 Value",
    "Variant SKU",
    "Variant Grams",
    "Variant Inventory Tracker",
    "Variant Inventory Qty",
    "Variant Inventory Policy",
    "Variant Fulfillment Service",
    "Variant Price",
    "Variant Compare At Price",
    "Variant Requires Shipping",
    "Variant Taxable",
    "Variant Barcode",
    "Image Src",
    "Image Position",
    "Image Alt Text",
    "Gift Card",
    "SEO Title",
    "SEO Description",
    "Google Shopping / Google Product Category",
    "Google Shopping / Gender",
    "Google Shopping / Age Group",
    "Google Shopping / MPN",
    "Google Shopping / AdWords Grouping",
    "Google Shopping / AdWords Labels",
    "Google Shopping / Condition",
    "Google Shopping / Custom Product",
    "Google Shopping / Custom Label 0",
    "Google Shopping / Custom Label 1",
    "Google Shopping / Custom Label 2",
    "Google Shopping / Custom Label 3",
    "Google Shopping / Custom Label 4",
    "Variant Image",
    "Variant Weight Unit",
    "Variant Tax Code",
    "Cost per item",
    "Status",
];

/// One canonical row: the named cells set, every other column blank.
fn shopify_row(cells: &[(&str, &str)]) -> Vec<String> {
    let cells: HashMap<&str, &str> = cells.iter().copied().collect();
    SHOPIFY_HEADERS
        .iter()
        .map(|h| cells.get(h).copied().unwrap_or_default().to_string())
        .collect()
}

fn canonical(rows: Vec<Vec<String>>) -> Table {
    Table::new(
        "canonical",
        SHOPIFY_HEADERS.iter().map(|h| (*h).to_string()).collect(),
        rows,
    )
}

fn options_catalog(entries: &[(&str, &str)]) -> Table {
    Table::new(
        "catalog",
        vec!["code (Variant SKU)".to_string(), "options".to_string()],
        entries
            .iter()
            .map(|(code, block)| vec![(*code).to_string(), (*block).to_string()])
            .collect(),
    )
}

fn bed_row() -> Vec<String> {
    shopify_row(&[
        ("Handle", "oak-bed"),
        ("Title", "Oak Bed"),
        ("Vendor", "Northwood"),
        ("Option1 Name", "Title"),
        ("Option1 Value", "Default Title"),
        ("Variant SKU", "BED-100-01"),
        ("Variant Grams", "45000"),
        ("Variant Inventory Qty", "7"),
        ("Variant Price", "500"),
        ("Variant Compare At Price", "600"),
        ("Image Src", "https://cdn.example.test/bed.jpg"),
        ("Status", "active"),
    ])
}

fn lamp_row() -> Vec<String> {
    shopify_row(&[
        ("Handle", "arc-lamp"),
        ("Title", "Arc Lamp"),
        ("Variant SKU", "LMP-9-01"),
        ("Variant Price", "120.00"),
        ("Variant Compare At Price", "150"),
        ("Variant Barcode", "00123"),
        ("Status", "draft"),
    ])
}

const BED_OPTIONS: &str = "\"Color\" \"Red\" \"Blue (+50)\"\n\"Size\" \"Queen\" \"King (+200)\"";
const LAMP_OPTIONS: &str = "\"Finish\" \"Brass\" \"Black (+15)\" \"Chrome (+10)\"\n\
                            \"Shade\" \"Linen\" \"Paper\"\n\
                            \"Bulb\" \"Warm\" \"Cool\" \"Smart (+45)\"";

fn expand(source: &Table, catalog: &Table) -> Result<Expansion, EngineError> {
    expand_catalog(
        source,
        catalog,
        &ExportProfile::default(),
        ExpandSettings::default(),
    )
}

fn column<'a>(expansion: &'a Expansion, name: &str) -> Vec<&'a str> {
    let idx = expansion
        .schema
        .columns
        .iter()
        .position(|c| c == name)
        .unwrap_or_else(|| panic!("column {name} missing from schema"));
    expansion.rows.iter().map(|r| r[idx].as_str()).collect()
}

// ---------------------------------------------------------------------------
// Happy paths
// ---------------------------------------------------------------------------

#[test]
fn single_product_expands_to_every_combination() {
    let expansion = expand(
        &canonical(vec![bed_row()]),
        &options_catalog(&[("BED-100", BED_OPTIONS)]),
    )
    .expect("expansion succeeds");

    assert_eq!(expansion.rows.len(), 4);
    assert_eq!(
        column(&expansion, "Variant SKU"),
        ["BED-100-01", "BED-100-02", "BED-100-03", "BED-100-04"]
    );
    assert_eq!(column(&expansion, "Option1 Name"), ["Color"; 4]);
    assert_eq!(
        column(&expansion, "Option1 Value"),
        ["Red", "Red", "Blue", "Blue"]
    );
    assert_eq!(column(&expansion, "Option2 Name"), ["Size"; 4]);
    assert_eq!(
        column(&expansion, "Option2 Value"),
        ["Queen", "King", "Queen", "King"]
    );
    assert_eq!(
        column(&expansion, "Variant Price"),
        ["500", "700", "550", "750"]
    );
    assert_eq!(
        column(&expansion, "Variant Compare At Price"),
        ["600", "800", "650", "850"]
    );
    assert_eq!(column(&expansion, "Variant Inventory Qty"), ["250"; 4]);
}

#[test]
fn pass_through_columns_are_copied_and_others_left_blank() {
    let expansion = expand(
        &canonical(vec![bed_row()]),
        &options_catalog(&[("BED-100", BED_OPTIONS)]),
    )
    .expect("expansion succeeds");

    assert_eq!(column(&expansion, "Title"), ["Oak Bed"; 4]);
    assert_eq!(column(&expansion, "Vendor"), ["Northwood"; 4]);
    assert_eq!(column(&expansion, "Variant Grams"), ["45000"; 4]);
    assert_eq!(column(&expansion, "Status"), ["active"; 4]);
    // Image columns are not pass-through.
    assert_eq!(column(&expansion, "Image Src"), [""; 4]);
    assert_eq!(column(&expansion, "Tags"), [""; 4]);
}

#[test]
fn batch_with_mixed_option_counts_shares_one_schema() {
    let expansion = expand(
        &canonical(vec![bed_row(), lamp_row()]),
        &options_catalog(&[("LMP-9", LAMP_OPTIONS), ("BED-100", BED_OPTIONS)]),
    )
    .expect("expansion succeeds");

    assert_eq!(expansion.products.len(), 2);
    assert_eq!(expansion.rows.len(), 4 + 3 * 2 * 3);
    assert_eq!(
        expansion.schema.columns.len(),
        SHOPIFY_HEADERS.len() - 6 + 2 * 3
    );
    for row in &expansion.rows {
        assert_eq!(row.len(), expansion.schema.columns.len());
    }

    let option3 = column(&expansion, "Option3 Value");
    assert!(option3[..4].iter().all(|v| v.is_empty()));
    assert_eq!(&option3[4..7], ["Warm", "Cool", "Smart"]);

    let skus = column(&expansion, "Variant SKU");
    assert_eq!(skus[4], "LMP-9-01");
    assert_eq!(skus[21], "LMP-9-18");

    let prices = column(&expansion, "Variant Price");
    // Black (+15), Linen, Smart (+45) on a 120 base.
    assert_eq!(prices[4 + 6 + 2], "180");
    assert_eq!(column(&expansion, "Variant Barcode")[4], "123");
}

#[test]
fn inventory_sums_to_total_stock_per_product() {
    let expansion = expand(
        &canonical(vec![bed_row(), lamp_row()]),
        &options_catalog(&[("BED-100", BED_OPTIONS), ("LMP-9", LAMP_OPTIONS)]),
    )
    .expect("expansion succeeds");

    let quantities: Vec<u32> = column(&expansion, "Variant Inventory Qty")
        .iter()
        .map(|q| q.parse().expect("numeric quantity"))
        .collect();
    assert_eq!(quantities[..4].iter().sum::<u32>(), 1000);
    assert_eq!(quantities[4..].iter().sum::<u32>(), 1000);
    // 1000 / 18 = 55 remainder 10.
    assert_eq!(quantities[4], 56);
    assert_eq!(quantities[13], 56);
    assert_eq!(quantities[14], 55);
}

#[test]
fn worker_pool_output_matches_sequential_output() {
    let source = canonical(vec![bed_row(), lamp_row()]);
    let catalog = options_catalog(&[("BED-100", BED_OPTIONS), ("LMP-9", LAMP_OPTIONS)]);

    let sequential = expand(&source, &catalog).expect("sequential run succeeds");
    let parallel = expand_catalog(
        &source,
        &catalog,
        &ExportProfile::default(),
        ExpandSettings {
            workers: 3,
            ..ExpandSettings::default()
        },
    )
    .expect("parallel run succeeds");

    assert_eq!(parallel.schema, sequential.schema);
    assert_eq!(parallel.rows, sequential.rows);
}

#[test]
fn non_first_variant_rows_only_contribute_their_base_code() {
    let mut second = bed_row();
    second[SHOPIFY_HEADERS
        .iter()
        .position(|h| *h == "Variant SKU")
        .expect("sku column")] = "BED-100-02".to_string();

    let expansion = expand(
        &canonical(vec![bed_row(), second]),
        &options_catalog(&[("BED-100", BED_OPTIONS)]),
    )
    .expect("expansion succeeds");
    assert_eq!(expansion.products.len(), 1);
    assert_eq!(expansion.rows.len(), 4);
}

#[test]
fn record_dump_serializes_products_under_data() {
    let expansion = expand(
        &canonical(vec![bed_row()]),
        &options_catalog(&[("BED-100", BED_OPTIONS)]),
    )
    .expect("expansion succeeds");

    let json = serde_json::to_value(expansion.record_dump()).expect("dump serializes");
    let product = &json["data"][0];
    assert_eq!(product["code"], "BED-100");
    assert_eq!(product["basic_rate"], 500);
    assert_eq!(product["compare_rate"], 600);
    assert_eq!(product["options"][0]["name"], "Color");
    assert_eq!(product["options"][0]["position"], 1);
    assert_eq!(product["options"][0]["values"][1]["label"], "Blue");
    assert_eq!(product["options"][0]["values"][1]["additional_rate"], 50);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn product_missing_from_catalog_is_lookup_failure() {
    let err = expand(
        &canonical(vec![bed_row(), lamp_row()]),
        &options_catalog(&[("BED-100", BED_OPTIONS)]),
    )
    .unwrap_err();
    assert!(
        matches!(err, EngineError::LookupFailure { ref code } if code == "LMP-9"),
        "got: {err:?}"
    );
}

#[test]
fn product_without_first_variant_row_is_missing_canonical_row() {
    let mut row = bed_row();
    row[SHOPIFY_HEADERS
        .iter()
        .position(|h| *h == "Variant SKU")
        .expect("sku column")] = "BED-100-02".to_string();

    let err = expand(
        &canonical(vec![row]),
        &options_catalog(&[("BED-100", BED_OPTIONS)]),
    )
    .unwrap_err();
    assert!(
        matches!(err, EngineError::MissingCanonicalRow { ref key, .. } if key == "BED-100-01"),
        "got: {err:?}"
    );
}

#[test]
fn option_line_without_values_is_malformed() {
    let err = expand(
        &canonical(vec![bed_row()]),
        &options_catalog(&[("BED-100", "\"Color\" \"Red\"\n\"Size\"")]),
    )
    .unwrap_err();
    assert!(
        matches!(err, EngineError::MalformedOption { ref code, .. } if code == "BED-100"),
        "got: {err:?}"
    );
}

#[test]
fn split_option_columns_are_schema_mismatch() {
    let mut headers: Vec<String> = SHOPIFY_HEADERS.iter().map(|h| (*h).to_string()).collect();
    // Move "Published" into the middle of the option span.
    let published = headers.remove(7);
    headers.insert(9, published);
    let source = Table::new("canonical", headers, vec![bed_row()]);

    let err = expand(&source, &options_catalog(&[("BED-100", BED_OPTIONS)])).unwrap_err();
    assert!(
        matches!(err, EngineError::SchemaMismatch { .. }),
        "got: {err:?}"
    );
}

#[test]
fn product_with_overflowing_combinations_is_rejected() {
    let block: Vec<String> = (1..=16)
        .map(|axis| {
            let values: Vec<String> = (0..20).map(|v| format!("\"Tone {v}\"")).collect();
            format!("\"Axis {axis}\" {}", values.join(" "))
        })
        .collect();
    let block = block.join("\n");

    let err = expand(
        &canonical(vec![bed_row()]),
        &options_catalog(&[("BED-100", block.as_str())]),
    )
    .unwrap_err();
    assert!(
        matches!(err, EngineError::TooManyCombinations { ref code, .. } if code == "BED-100"),
        "got: {err:?}"
    );
}

#[test]
fn non_numeric_price_is_invalid_price() {
    let mut row = bed_row();
    row[SHOPIFY_HEADERS
        .iter()
        .position(|h| *h == "Variant Price")
        .expect("price column")] = "five hundred".to_string();

    let err = expand(
        &canonical(vec![row]),
        &options_catalog(&[("BED-100", BED_OPTIONS)]),
    )
    .unwrap_err();
    assert!(
        matches!(err, EngineError::InvalidPrice { ref column, .. } if column == "Variant Price"),
        "got: {err:?}"
    );
}
