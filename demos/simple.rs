//! Encoding a chart values document from Rust types.
//!
//! Run with: cargo run --example simple

use helm_values::to_string;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;

#[derive(Debug, Serialize)]
struct Image {
    repository: String,
    tag: Option<String>,
}

#[derive(Debug, Serialize)]
struct Values {
    #[serde(rename = "replicaCount")]
    replica_count: u32,
    image: Image,
    #[serde(rename = "nodeSelector")]
    node_selector: BTreeMap<String, Option<String>>,
    tolerations: Vec<Option<String>>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut node_selector = BTreeMap::new();
    node_selector.insert("disktype".to_string(), None);

    let values = Values {
        replica_count: 2,
        image: Image {
            repository: "nginx".to_string(),
            tag: None,
        },
        node_selector,
        tolerations: vec![None, None],
    };

    // Unset fields disappear, and so do the containers they leave empty
    let yaml = to_string(&values)?;
    println!("values.yaml:\n{}", yaml);
    assert_eq!(yaml, "image:\n  repository: nginx\nreplicaCount: 2\n");

    Ok(())
}
