//! # Reference Scenarios
//!
//! The invocation sequences a client of the chaincode relies on, run
//! through the peer so every step commits or discards like a real
//! transaction.

#[cfg(test)]
mod tests {
    use crate::fixtures::{args, request, seeded_world};
    use el_contract::prelude::*;
    use el_peer::Peer;

    fn peer_over(world: InMemoryLedger) -> Peer {
        Peer::new(EntityContract::default(), world)
    }

    #[tokio::test]
    async fn test_initialize_then_query() {
        let peer = peer_over(InMemoryLedger::new());
        assert!(peer
            .init(args(&["alice", "30", "bob", "Name=Bob"]))
            .await
            .is_success());

        let response = peer.invoke(request("q1", "query", &["alice"])).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.payload, r#"{"Name":"alice","Value":"30"}"#);

        let response = peer.invoke(request("q2", "query", &["bob"])).await;
        assert_eq!(response.payload, r#"{"Name":"bob","Value":"Name=Bob"}"#);
    }

    #[tokio::test]
    async fn test_transfer_assigns_amount_to_destination() {
        let peer = peer_over(seeded_world());
        let response = peer
            .invoke(request("t1", "invoke", &["alice", "bob", "42", "Name=Alice"]))
            .await;
        assert!(response.is_success());

        let response = peer.invoke(request("q1", "query", &["bob"])).await;
        assert_eq!(response.payload, r#"{"Name":"bob","Value":"42"}"#);
        assert_eq!(peer.world().get("alice"), Some(b"Name=Alice".to_vec()));
    }

    #[tokio::test]
    async fn test_delete_then_query_reports_missing_entity() {
        let peer = peer_over(seeded_world());
        assert!(peer
            .invoke(request("d1", "delete", &["alice"]))
            .await
            .is_success());

        let response = peer.invoke(request("q1", "query", &["alice"])).await;
        assert_eq!(response.status, 500);
        assert_eq!(response.message, r#"{"Error":"Nil amount for alice"}"#);
    }

    #[tokio::test]
    async fn test_delete_absent_key_succeeds_twice() {
        let peer = peer_over(InMemoryLedger::new());
        for tx in ["d1", "d2"] {
            assert!(peer.invoke(request(tx, "delete", &["ghost"])).await.is_success());
        }
        assert!(peer.world().is_empty());
    }

    #[tokio::test]
    async fn test_transfer_with_missing_operand_changes_nothing() {
        let peer = peer_over(seeded_world());
        let before = peer.world().snapshot();

        for (from, to) in [("alice", "carol"), ("carol", "bob")] {
            let response = peer
                .invoke(request("t1", "invoke", &[from, to, "42", "x"]))
                .await;
            assert_eq!(response.message, "Entity not found: carol");
        }
        assert_eq!(peer.world().snapshot(), before);
    }

    #[tokio::test]
    async fn test_rejected_requests_leave_world_untouched() {
        let peer = peer_over(seeded_world());
        let before = peer.world().snapshot();

        let bad = [
            request("r1", "invoke", &["alice", "bob"]),
            request("r2", "invoke", &["alice", "bob", "forty-two", "x"]),
            request("r3", "init", &["alice", "thirty", "bob", "x"]),
            request("r4", "Delete", &["alice"]),
            request("r5", "delete", &["alice", "bob"]),
            request("r6", "query", &[]),
        ];
        for req in bad {
            let response = peer.invoke(req).await;
            assert_eq!(response.status, 500, "{response:?}");
        }
        assert_eq!(peer.world().snapshot(), before);
        assert_eq!(peer.stats().commits, 0);
    }

    #[tokio::test]
    async fn test_negative_counters_never_reach_the_world() {
        let peer = peer_over(InMemoryLedger::new());
        let response = peer.init(args(&["alice", "-5", "bob", "x"])).await;
        assert_eq!(response.status, 500);
        assert!(response.message.starts_with("Invalid amount -5 at position 1"));
        assert!(peer.world().is_empty());

        let peer = peer_over(seeded_world());
        let response = peer
            .invoke(request("t1", "invoke", &["alice", "bob", "-42", "L"]))
            .await;
        assert_eq!(response.status, 500);
        assert_eq!(peer.world().get("bob"), Some(b"Name=Bob".to_vec()));
        assert_eq!(peer.stats().commits, 0);
    }

    #[tokio::test]
    async fn test_reinitialize_overwrites_existing_entities() {
        let peer = peer_over(seeded_world());
        assert!(peer
            .invoke(request("i1", "init", &["alice", "7", "bob", "Name=Robert"]))
            .await
            .is_success());
        assert_eq!(peer.world().get("alice"), Some(b"7".to_vec()));
        assert_eq!(peer.world().get("bob"), Some(b"Name=Robert".to_vec()));
    }

    #[tokio::test]
    async fn test_custom_init_schema() {
        let contract = EntityContract::new(
            ContractConfig::from_schema_str("integer,integer,text").unwrap(),
        )
        .unwrap();
        let peer = Peer::new(contract, InMemoryLedger::new());

        let response = peer.init(args(&["a", "1", "b", "2"])).await;
        assert!(response.message.contains("Expecting 6, got 4"));

        let response = peer.init(args(&["a", "1", "b", "2", "c", "label"])).await;
        assert!(response.is_success());
        assert_eq!(peer.world().len(), 3);
    }
}
