//! Basic usage example for txwire
//!
//! Run with: cargo run --example basic_usage

use txwire::messages::cancel_order::{self, CancelOrder};
use txwire::messages::std_signature::StdSignature;
use txwire::*;

fn main() -> txwire::Result<()> {
    println!("txwire Basic Usage Example");
    println!("==========================");

    // Example 1: Build, encode and decode a cancel order
    println!("\n1. CancelOrder Message:");
    {
        let order = CancelOrder::builder()
            .set_sender(vec![0xBA; 20])
            .set_symbol("BNB_USDT")
            .set_refid("abc123")
            .finalize();

        let bytes = order.encode();
        println!("  Encoded {} bytes", bytes.len());

        let decoded = CancelOrder::decode(&bytes)?;
        println!(
            "  Decoded: sender={} bytes, symbol={}, refid={}",
            decoded.sender().len(),
            decoded.symbol(),
            decoded.refid()
        );
        assert_eq!(decoded, order);
    }

    // Example 2: Integer fields and default omission
    println!("\n2. StdSignature Message:");
    {
        let sig = StdSignature::builder()
            .set_pub_key(vec![0x02; 33])
            .set_signature(vec![0x5F; 64])
            .set_account_number(300)
            .finalize();

        let bytes = sig.encode();
        println!("  Encoded {} bytes (sequence = 0 is omitted)", bytes.len());

        let decoded = StdSignature::decode(&bytes)?;
        println!(
            "  Decoded: account_number={}, sequence={}",
            decoded.account_number(),
            decoded.sequence()
        );
        println!("  Empty message encodes to {} bytes", StdSignature::default().encode().len());
    }

    // Example 3: Fields from a newer schema pass through untouched
    println!("\n3. Unknown Fields:");
    {
        let mut builder = cancel_order::Builder::new();
        builder.set_symbol("ETH_BTC");
        builder.merge_unknown_fields(
            &[
                UnknownField::varint(7, 150),
                UnknownField::length_delimited(8, b"memo"),
            ]
            .into_iter()
            .collect::<UnknownFieldSet>(),
        );
        let bytes = builder.finalize().encode();

        let decoded = CancelOrder::decode(&bytes)?;
        for field in decoded.unknown_fields() {
            println!(
                "  Unknown field {} ({:?}): {} payload bytes",
                field.number(),
                field.wire_type(),
                field.payload().len()
            );
        }
        println!("  Re-encoded identically: {}", decoded.encode() == bytes);
    }

    // Example 4: Merging
    println!("\n4. Merge Semantics:");
    {
        let base = StdSignature::builder()
            .set_account_number(1)
            .set_sequence(2)
            .finalize();
        let update = StdSignature::builder().set_sequence(3).finalize();

        let mut builder = base.to_builder();
        builder.merge_from(&update);
        let merged = builder.finalize();
        println!(
            "  Message merge: account_number={}, sequence={}",
            merged.account_number(),
            merged.sequence()
        );

        builder.merge_from_bytes(&[0x18, 0x09])?;
        println!("  Bytes merge: account_number={}", builder.account_number());

        // A failed merge leaves the builder untouched.
        let err = builder.merge_from_bytes(&[0x20, 0x80]).unwrap_err();
        println!("  Truncated input rejected: {} (sequence still {})", err, builder.sequence());
    }

    // Example 5: Generic schema-driven API
    println!("\n5. Generic API:");
    {
        let mut builder = Builder::new(&cancel_order::SCHEMA);
        builder.set(cancel_order::fields::SYMBOL, "BNB_USDT")?;
        let message = builder.finalize();

        for (field, value) in message.fields() {
            println!("  {} = {:?}", field.name, value);
        }

        match builder.set(cancel_order::fields::SYMBOL, 5i64) {
            Err(err) => println!("  Kind mismatch rejected: {}", err),
            Ok(_) => println!("  Unexpected success"),
        }
    }

    // Example 6: Length-delimited stream
    println!("\n6. Length-Delimited Stream:");
    {
        let mut stream = Vec::new();
        for symbol in ["BNB_USDT", "ETH_BTC", "XRP_BNB"] {
            let order = CancelOrder::builder().set_symbol(symbol).finalize();
            stream.extend(order.encode_length_delimited());
        }
        println!("  Stream of {} bytes", stream.len());

        let mut offset = 0;
        while offset < stream.len() {
            let (order, used) = CancelOrder::decode_length_delimited(&stream[offset..])?;
            println!("  Frame at {}: symbol={}", offset, order.symbol());
            offset += used;
        }
    }

    println!("\nAll examples completed successfully!");
    Ok(())
}
