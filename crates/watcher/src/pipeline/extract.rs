//! Fan-out stages: block to transaction summaries, summary to events.

use crate::types::{Block, Event, EventFragment, Extra, TransactionSummary};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Receipt of transaction {transaction_index} has no events")]
    MissingEvents {
        transaction_index: u64,
        transaction_hash: Option<String>,
    },

    #[error(
        "Event {log_index} of transaction {transaction_index} sets '{field}' to an unusable value"
    )]
    InvalidOverride {
        transaction_index: u64,
        log_index: u64,
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Pairs each transaction with the receipt at the same position.
///
/// Pairing stops at the end of the shorter list; surplus transactions or
/// receipts are dropped.
pub fn transaction_summaries(block: Block) -> Vec<TransactionSummary> {
    let Block {
        block_hash,
        parent_block_hash,
        transactions,
        transaction_receipts,
        ..
    } = block;

    transactions
        .into_iter()
        .zip(transaction_receipts)
        .map(|(transaction, receipt)| {
            TransactionSummary::new(
                transaction,
                receipt,
                parent_block_hash.clone(),
                block_hash.clone(),
            )
        })
        .collect()
}

/// Expands the receipt events of `summary`, in receipt order, numbering them
/// from 0.
pub fn events_from_summary(summary: &TransactionSummary) -> Result<Vec<Event>, ExtractError> {
    let Some(fragments) = summary.receipt.events.as_ref() else {
        return Err(ExtractError::MissingEvents {
            transaction_index: summary.receipt.transaction_index,
            transaction_hash: summary.transaction.transaction_hash.clone(),
        });
    };

    fragments
        .iter()
        .enumerate()
        .map(|(position, fragment)| stamp_event(summary, position as u64, fragment.clone()))
        .collect()
}

fn stamp_event(
    summary: &TransactionSummary,
    log_index: u64,
    mut fragment: EventFragment,
) -> Result<Event, ExtractError> {
    let invalid = |field: &'static str, source: serde_json::Error| ExtractError::InvalidOverride {
        transaction_index: summary.receipt.transaction_index,
        log_index,
        field,
        source,
    };

    let mut block_hash = summary.block_hash.clone();
    let mut parent_block_hash = Some(summary.parent_block_hash.clone());
    let mut transaction_hash = summary.transaction.transaction_hash.clone();
    let mut transaction_index = summary.receipt.transaction_index;
    let mut position = log_index;

    // Fragment fields take precedence over the stamped ones, `null` included.
    let extra = &mut fragment.extra;
    take_override(extra, "block_hash", &mut block_hash).map_err(|e| invalid("block_hash", e))?;
    take_override(extra, "parent_block_hash", &mut parent_block_hash)
        .map_err(|e| invalid("parent_block_hash", e))?;
    take_override(extra, "transaction_hash", &mut transaction_hash)
        .map_err(|e| invalid("transaction_hash", e))?;
    take_override(extra, "transaction_index", &mut transaction_index)
        .map_err(|e| invalid("transaction_index", e))?;
    take_override(extra, "log_index", &mut position).map_err(|e| invalid("log_index", e))?;

    Ok(Event {
        block_hash,
        parent_block_hash,
        transaction_hash,
        transaction_index,
        log_index: position,
        fragment,
    })
}

fn take_override<T: DeserializeOwned>(
    extra: &mut Extra,
    field: &str,
    slot: &mut T,
) -> Result<(), serde_json::Error> {
    if let Some(value) = extra.remove(field) {
        *slot = serde_json::from_value(value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(body: serde_json::Value) -> Block {
        serde_json::from_value(body).unwrap()
    }

    fn two_transaction_block() -> Block {
        block(json!({
            "block_hash": "0xb10c",
            "parent_block_hash": "0xpa",
            "status": "ACCEPTED_ON_L2",
            "block_number": 10,
            "timestamp": 1,
            "transactions": [
                { "transaction_hash": "0xt1" },
                { "transaction_hash": "0xt2" }
            ],
            "transaction_receipts": [
                {
                    "transaction_index": 0,
                    "events": [ { "from_address": "0xe1", "keys": ["0xk"], "data": [] } ]
                },
                {
                    "transaction_index": 1,
                    "events": [
                        { "from_address": "0xe1", "keys": ["0xk"], "data": [] },
                        { "from_address": "0xe2", "keys": [], "data": ["0xd"] }
                    ]
                }
            ]
        }))
    }

    #[test]
    fn summaries_follow_block_order() {
        let summaries = transaction_summaries(two_transaction_block());

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].transaction_hash(), "0xt1");
        assert_eq!(summaries[0].receipt.transaction_index, 0);
        assert_eq!(summaries[1].transaction_hash(), "0xt2");
        assert_eq!(summaries[1].receipt.transaction_index, 1);
        for summary in &summaries {
            assert_eq!(summary.parent_block_hash, "0xpa");
            assert_eq!(summary.block_hash.as_deref(), Some("0xb10c"));
        }
    }

    #[test]
    fn summaries_truncate_to_shorter_side() {
        let more_transactions = block(json!({
            "parent_block_hash": "0x1",
            "status": "PENDING",
            "timestamp": 1,
            "transactions": [
                { "transaction_hash": "0x1" },
                { "transaction_hash": "0x2" },
                { "transaction_hash": "0x3" }
            ],
            "transaction_receipts": [ { "transaction_index": 0, "events": [] } ]
        }));
        assert_eq!(transaction_summaries(more_transactions).len(), 1);

        let more_receipts = block(json!({
            "parent_block_hash": "0x1",
            "status": "PENDING",
            "timestamp": 1,
            "transactions": [ { "transaction_hash": "0x1" } ],
            "transaction_receipts": [
                { "transaction_index": 0, "events": [] },
                { "transaction_index": 1, "events": [] }
            ]
        }));
        assert_eq!(transaction_summaries(more_receipts).len(), 1);
    }

    #[test]
    fn events_are_stamped_and_numbered() {
        let events: Vec<Event> = transaction_summaries(two_transaction_block())
            .iter()
            .flat_map(|summary| events_from_summary(summary).unwrap())
            .collect();

        assert_eq!(events.len(), 3);

        let stamps: Vec<(Option<&str>, u64, u64)> = events
            .iter()
            .map(|e| (e.transaction_hash.as_deref(), e.transaction_index, e.log_index))
            .collect();
        assert_eq!(
            stamps,
            vec![(Some("0xt1"), 0, 0), (Some("0xt2"), 1, 0), (Some("0xt2"), 1, 1)]
        );

        assert_eq!(events[2].fragment.from_address(), Some("0xe2"));
        assert_eq!(events[2].fragment.extra["data"], json!(["0xd"]));
        for event in &events {
            assert_eq!(event.block_hash.as_deref(), Some("0xb10c"));
            assert_eq!(event.parent_block_hash.as_deref(), Some("0xpa"));
        }
    }

    #[test]
    fn event_serializes_flat() {
        let summaries = transaction_summaries(two_transaction_block());
        let event = events_from_summary(&summaries[1]).unwrap().remove(1);
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["transaction_hash"], "0xt2");
        assert_eq!(value["log_index"], 1);
        assert_eq!(value["from_address"], "0xe2");
        assert_eq!(value["data"], json!(["0xd"]));
    }

    #[test]
    fn fragment_fields_override_stamps() {
        let summary = transaction_summaries(block(json!({
            "parent_block_hash": "0xpa",
            "status": "PENDING",
            "timestamp": 1,
            "transactions": [ { "transaction_hash": "0xt1" } ],
            "transaction_receipts": [
                {
                    "transaction_index": 4,
                    "events": [ { "keys": [], "data": [], "transaction_index": 9, "order": 2 } ]
                }
            ]
        })))
        .remove(0);

        let event = events_from_summary(&summary).unwrap().remove(0);
        assert_eq!(event.transaction_index, 9);
        assert_eq!(event.fragment.extra.get("transaction_index"), None);
        assert_eq!(event.fragment.extra["order"], 2);

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["transaction_index"], 9);
    }

    #[test]
    fn null_overrides_pass_through() {
        let summary = transaction_summaries(block(json!({
            "block_hash": "0xb10c",
            "parent_block_hash": "0xpa",
            "status": "ACCEPTED_ON_L2",
            "timestamp": 1,
            "transactions": [ { "transaction_hash": "0xt1" } ],
            "transaction_receipts": [
                {
                    "transaction_index": 0,
                    "events": [ { "parent_block_hash": null, "transaction_hash": null } ]
                }
            ]
        })))
        .remove(0);

        let event = events_from_summary(&summary).unwrap().remove(0);
        assert_eq!(event.parent_block_hash, None);
        assert_eq!(event.transaction_hash, None);
        assert_eq!(event.block_hash.as_deref(), Some("0xb10c"));
        assert!(event.fragment.extra.is_empty());

        let value = serde_json::to_value(&event).unwrap();
        assert!(value["parent_block_hash"].is_null());
        assert!(value["transaction_hash"].is_null());
    }

    #[test]
    fn transaction_without_hash_is_expanded() {
        let summary = transaction_summaries(block(json!({
            "parent_block_hash": "0xpa",
            "status": "PENDING",
            "timestamp": 1,
            "transactions": [ { "type": "DEPLOY", "contract_address": "0xc" } ],
            "transaction_receipts": [
                { "transaction_index": 2, "events": [ { "keys": [1], "data": null } ] }
            ]
        })))
        .remove(0);

        let event = events_from_summary(&summary).unwrap().remove(0);
        assert_eq!(event.transaction_hash, None);
        assert_eq!(event.transaction_index, 2);

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["keys"], json!([1]));
        assert!(value["data"].is_null());
        assert!(value["transaction_hash"].is_null());
    }

    #[test]
    fn unusable_override_is_an_error() {
        let summary = transaction_summaries(block(json!({
            "parent_block_hash": "0xpa",
            "status": "PENDING",
            "timestamp": 1,
            "transactions": [ { "transaction_hash": "0xt1" } ],
            "transaction_receipts": [
                { "transaction_index": 0, "events": [ { "log_index": "first" } ] }
            ]
        })))
        .remove(0);

        assert!(matches!(
            events_from_summary(&summary),
            Err(ExtractError::InvalidOverride { field: "log_index", .. })
        ));
    }

    #[test]
    fn missing_events_is_an_error() {
        let summary = transaction_summaries(block(json!({
            "parent_block_hash": "0xpa",
            "status": "PENDING",
            "timestamp": 1,
            "transactions": [ { "transaction_hash": "0xt1" } ],
            "transaction_receipts": [ { "transaction_index": 0 } ]
        })))
        .remove(0);

        match events_from_summary(&summary) {
            Err(ExtractError::MissingEvents {
                transaction_index,
                transaction_hash,
            }) => {
                assert_eq!(transaction_index, 0);
                assert_eq!(transaction_hash.as_deref(), Some("0xt1"));
            }
            other => panic!("expected MissingEvents, got {:?}", other),
        }
    }
}
