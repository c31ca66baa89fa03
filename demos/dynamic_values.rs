//! Encoding host values: sets, dynamic wrappers, unknowns and JSON input.
//!
//! Run with: cargo run --example dynamic_values

use helm_values::{dynamic, encode, encode_argument, DynamicValue, Error};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let values = dynamic!({
        "zones": set ["us-east-1a", "us-east-1b"],
        "overrides": dyn { "debug": false, "logLevel": dyn null },
        "podAnnotations": { "checksum/config": null },
    });
    println!("Host values:\n{}", encode(&values)?);

    // Any self-describing format deserializes into a DynamicValue
    let from_json: DynamicValue = serde_json::from_str(
        r#"{"env": [{"name": "MODE", "value": "prod"}, null], "threshold": 0.1}"#,
    )?;
    println!("From JSON:\n{}", encode(&from_json)?);

    // Unresolved values cannot be encoded; the error names where they are
    let pending = dynamic!({ "ingress": { "host": unknown } });
    match encode(&pending) {
        Err(Error::UnsupportedShape { shape, path }) => {
            println!("Cannot encode `{}` at {}\n", shape, path);
        }
        other => println!("Unexpected result: {:?}\n", other),
    }

    // Function-call entry point rejects a null or unknown argument outright
    if let Err(err) = encode_argument(&DynamicValue::Null) {
        println!("{}", err);
    }

    Ok(())
}
