// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(dead_code)]

use axum::Router;
use serde_json::{Value, json};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_gateway(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake gateway");
    let addr = listener.local_addr().expect("Fake gateway has no address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Fake gateway stopped");
    });

    format!("http://{}", addr)
}

/// Pending block body with one transaction per entry of `event_counts`,
/// the transaction at position `i` emitting `event_counts[i]` events.
pub fn pending_block(event_counts: &[usize]) -> Value {
    let transactions: Vec<Value> = (0..event_counts.len())
        .map(|i| {
            json!({
                "transaction_hash": format!("0x{:04x}", i),
                "type": "INVOKE_FUNCTION",
                "contract_address": "0x0123",
                "entry_point_selector": "0x0456",
                "calldata": ["0x1"]
            })
        })
        .collect();

    let receipts: Vec<Value> = event_counts
        .iter()
        .enumerate()
        .map(|(i, count)| {
            let events: Vec<Value> = (0..*count)
                .map(|e| {
                    json!({
                        "from_address": "0x0123",
                        "keys": [format!("0x{:x}", e)],
                        "data": ["0x0", format!("0x{:x}", i)]
                    })
                })
                .collect();
            json!({
                "transaction_index": i,
                "transaction_hash": format!("0x{:04x}", i),
                "l2_to_l1_messages": [],
                "events": events,
                "execution_resources": { "n_steps": 100, "n_memory_holes": 0 },
                "actual_fee": "0x0"
            })
        })
        .collect();

    json!({
        "parent_block_hash": "0x05a1",
        "status": "PENDING",
        "timestamp": 1666700000u64,
        "sequencer_address": "0x046a",
        "gas_price": "0x174876e800",
        "transactions": transactions,
        "transaction_receipts": receipts
    })
}
