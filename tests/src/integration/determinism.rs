//! # Replica Determinism
//!
//! Independent peers fed the same request sequence from the same starting
//! state must agree on every response and on the final world state.

#[cfg(test)]
mod tests {
    use crate::fixtures::{balance_world, request, seeded_world};
    use el_contract::adapters::InMemoryLedger;
    use el_contract::domain::entities::OperationRequest;
    use el_contract::domain::value_objects::ValueKind;
    use el_contract::service::{ContractConfig, EntityContract};
    use el_peer::Peer;
    use proptest::prelude::*;

    const KEYS: [&str; 3] = ["alice", "bob", "carol"];
    const LABELS: [&str; 2] = ["Name=Alice", "Name=Bob"];

    fn replica(world: &InMemoryLedger, contract: &EntityContract) -> Peer {
        Peer::new(
            contract.clone(),
            InMemoryLedger::from_entries(world.snapshot()),
        )
    }

    fn request_strategy() -> impl Strategy<Value = OperationRequest> {
        let key = || prop::sample::select(KEYS.to_vec());
        prop_oneof![
            (key(), key(), -5i64..50, prop::sample::select(LABELS.to_vec())).prop_map(
                |(from, to, amount, label)| {
                    OperationRequest::new("invoke", [from, to, amount.to_string().as_str(), label])
                }
            ),
            (key(), key(), -5i64..50).prop_map(|(from, to, amount)| {
                OperationRequest::new("transferBalance", [from, to, amount.to_string().as_str()])
            }),
            key().prop_map(|k| OperationRequest::new("delete", [k])),
            key().prop_map(|k| OperationRequest::new("query", [k])),
            (key(), 0i64..100, key()).prop_map(|(a, n, b)| {
                OperationRequest::new("init", [a, n.to_string().as_str(), b, "Name=Init"])
            }),
        ]
    }

    fn with_tx_ids(requests: Vec<OperationRequest>) -> Vec<OperationRequest> {
        requests
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.with_tx_id(format!("tx-{i}")))
            .collect()
    }

    #[tokio::test]
    async fn test_replicas_agree_on_reference_sequence() {
        let contract = EntityContract::default();
        let origin = seeded_world();
        let sequence = vec![
            request("t1", "invoke", &["alice", "bob", "42", "Name=Alice"]),
            request("t2", "query", &["bob"]),
            request("t3", "delete", &["alice"]),
            request("t4", "query", &["alice"]),
            request("t5", "init", &["carol", "1", "dave", "Name=Dave"]),
        ];

        let first = replica(&origin, &contract);
        let second = replica(&origin, &contract);
        let a = first.run_batch(sequence.clone()).await;
        let b = second.run_batch(sequence).await;

        assert_eq!(a, b);
        assert_eq!(first.world().snapshot(), second.world().snapshot());
        assert_eq!(first.stats(), second.stats());
    }

    #[tokio::test]
    async fn test_replicas_agree_under_concurrent_execution() {
        let contract = EntityContract::new(ContractConfig::with_schema(vec![
            ValueKind::Integer,
            ValueKind::Integer,
        ]))
        .unwrap();
        let origin = balance_world(1_000, 1_000);
        let sequence: Vec<_> = (0..50)
            .map(|i| {
                let (from, to) = if i % 3 == 0 { ("bob", "alice") } else { ("alice", "bob") };
                request(&format!("tx-{i}"), "transferBalance", &[from, to, "37"])
            })
            .collect();

        let first = replica(&origin, &contract);
        let second = replica(&origin, &contract);
        let (a, b) = tokio::join!(
            first.run_batch(sequence.clone()),
            second.run_batch(sequence)
        );

        assert_eq!(a, b);
        assert_eq!(first.world().snapshot(), second.world().snapshot());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_replicas_agree(requests in prop::collection::vec(request_strategy(), 1..24)) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let contract = EntityContract::default();
            let origin = seeded_world();
            let requests = with_tx_ids(requests);

            let first = replica(&origin, &contract);
            let second = replica(&origin, &contract);
            let a = rt.block_on(first.run_batch(requests.clone()));
            let b = rt.block_on(second.run_batch(requests));

            prop_assert_eq!(a, b);
            prop_assert_eq!(first.world().snapshot(), second.world().snapshot());
        }

        #[test]
        fn prop_balance_total_is_conserved(
            moves in prop::collection::vec((any::<bool>(), 0i64..400), 1..32),
        ) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let peer = Peer::new(EntityContract::default(), balance_world(500, 500));
            let requests = with_tx_ids(
                moves
                    .into_iter()
                    .map(|(forward, amount)| {
                        let (from, to) = if forward { ("alice", "bob") } else { ("bob", "alice") };
                        OperationRequest::new("transferBalance", [from, to, amount.to_string().as_str()])
                    })
                    .collect(),
            );
            rt.block_on(peer.run_batch(requests));

            let read = |key: &str| -> i64 {
                String::from_utf8(peer.world().get(key).unwrap()).unwrap().parse().unwrap()
            };
            prop_assert_eq!(read("alice") + read("bob"), 1_000);
        }
    }
}
