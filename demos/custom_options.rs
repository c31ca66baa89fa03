//! Customizing encoding with EncodeOptions.
//!
//! Run with: cargo run --example custom_options

use helm_values::{dynamic, encode, encode_with_options, EncodeOptions, SetOrder};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let values = dynamic!({
        "service": { "ports": [ { "name": "http", "port": 80 } ], "type": "ClusterIP" },
        "zones": set ["c", "a", "b"],
        "sidecar": unknown,
    });

    // Default options fail on the unresolved sidecar
    println!("Default: {:?}\n", encode(&values).map_err(|e| e.to_string()));

    // Treat nested unknowns as unset
    let lenient = EncodeOptions::new().with_unknown_as_absent(true);
    println!("Unknown as absent:\n{}", encode_with_options(&values, &lenient)?);

    // Wider indentation
    let wide = lenient.clone().with_indent(4);
    println!("Indent 4:\n{}", encode_with_options(&values, &wide)?);

    // Reproducible set order
    let sorted = lenient.with_set_order(SetOrder::Sorted);
    println!("Sorted sets:\n{}", encode_with_options(&values, &sorted)?);

    // Tight nesting limit
    let shallow = EncodeOptions::new().with_max_depth(1);
    if let Err(err) = encode_with_options(&dynamic!({ "a": { "b": 1 } }), &shallow) {
        println!("Depth limit: {}", err);
    }

    Ok(())
}
