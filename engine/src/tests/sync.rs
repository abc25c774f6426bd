use shared::AgentRecord;

use super::*;
use crate::EngineError;

#[tokio::test]
async fn test_unregistered_agent_stops_after_one_read() {
    let wallet = MockWallet::new(&[ALICE], EXPECTED_CHAIN);
    let engine = connected(&wallet).await;

    let record = engine.refresh().await.unwrap();

    assert_eq!(record, AgentRecord::default());
    assert_eq!(wallet.calls("isRegistered"), 1);
    assert_eq!(wallet.total_calls(), 1);
}

#[tokio::test]
async fn test_registered_agent_full_record() {
    let wallet = MockWallet::new(&[ALICE], EXPECTED_CHAIN).with_agent(ALICE, registered("ipfs://alice", 150));
    let engine = connected(&wallet).await;

    let record = engine.refresh().await.unwrap();

    assert!(record.is_registered);
    assert_eq!(record.metadata_uri, "ipfs://alice");
    assert_eq!(record.reputation_score, "150");
    assert_eq!(record.followers, vec![BOB]);
    assert_eq!(record.following, vec![BOB, CAROL]);
    assert_eq!(engine.agent(), record);
    for function in ["isRegistered", "getAgentMetadata", "getReputation", "getFollowers", "getFollowing"] {
        assert_eq!(wallet.calls(function), 1, "{function}");
    }
}

#[tokio::test]
async fn test_failed_detail_read_keeps_previous_record() {
    for failing in ["getAgentMetadata", "getReputation", "getFollowers", "getFollowing"] {
        let wallet = MockWallet::new(&[ALICE], EXPECTED_CHAIN).with_agent(ALICE, registered("ipfs://v1", 10));
        let engine = connected(&wallet).await;
        let before = engine.agent();
        assert_eq!(before.metadata_uri, "ipfs://v1");

        // Chain state moves on, but one of the four reads fails.
        wallet.with_agent(ALICE, registered("ipfs://v2", 99));
        wallet.fail_read(failing);

        let err = engine.refresh().await.unwrap_err();
        assert!(matches!(err, EngineError::Read(_)), "{failing}: {err}");
        assert_eq!(engine.agent(), before, "{failing} leaked a partial record");

        wallet.heal_reads();
        assert_eq!(engine.refresh().await.unwrap().metadata_uri, "ipfs://v2");
    }
}

#[tokio::test]
async fn test_failed_registration_check_keeps_previous_record() {
    let wallet = MockWallet::new(&[ALICE], EXPECTED_CHAIN).with_agent(ALICE, registered("ipfs://alice", 10));
    let engine = connected(&wallet).await;
    let before = engine.agent();

    wallet.fail_read("isRegistered");

    assert!(engine.refresh().await.is_err());
    assert_eq!(engine.agent(), before);
    assert_eq!(wallet.calls("getAgentMetadata"), 0);
}

#[tokio::test]
async fn test_refresh_is_noop_without_ready_session() {
    // Disconnected
    let wallet = MockWallet::new(&[ALICE], EXPECTED_CHAIN).with_agent(ALICE, registered("ipfs://alice", 10));
    let engine = engine_for(&wallet);
    assert_eq!(engine.refresh().await.unwrap(), AgentRecord::default());
    assert_eq!(wallet.total_calls(), 0);

    // Connected, wrong chain
    let wallet = MockWallet::new(&[ALICE], 1).with_agent(ALICE, registered("ipfs://alice", 10));
    let engine = connected(&wallet).await;
    assert_eq!(engine.refresh().await.unwrap(), AgentRecord::default());
    assert_eq!(wallet.total_calls(), 0);
}

#[tokio::test]
async fn test_disconnect_mid_refresh_discards_result() {
    let wallet = MockWallet::new(&[ALICE], EXPECTED_CHAIN).with_agent(ALICE, registered("ipfs://alice", 10));
    let engine = engine_for(&wallet);
    // connect without the automatic refresh populating anything first
    wallet.fail_read("isRegistered");
    engine.connect().await.unwrap();
    wallet.heal_reads();
    assert_eq!(engine.agent(), AgentRecord::default());

    let gate = wallet.gate("getFollowers");
    let (refreshed, _) = tokio::join!(engine.refresh(), async {
        gate.entered.recv().await.unwrap();
        engine.disconnect();
        gate.release.send(()).await.unwrap();
    });

    assert_eq!(refreshed.unwrap(), AgentRecord::default());
    assert_eq!(engine.agent(), AgentRecord::default());
    assert!(!engine.connection().connected);
}

#[tokio::test]
async fn test_account_switch_mid_refresh_discards_result() {
    let wallet = MockWallet::new(&[ALICE], EXPECTED_CHAIN)
        .with_agent(ALICE, registered("ipfs://alice", 10))
        .with_agent(BOB, registered("ipfs://bob", 20));
    let engine = connected(&wallet).await;

    let gate = wallet.gate("getFollowing");
    let (refreshed, _) = tokio::join!(engine.refresh(), async {
        gate.entered.recv().await.unwrap();
        wallet.emit_accounts(&[BOB]);
        engine.pump_events().await;
        gate.release.send(()).await.unwrap();
    });

    // Alice's late result must not overwrite Bob's record.
    assert_eq!(refreshed.unwrap().metadata_uri, "ipfs://bob");
    assert_eq!(engine.agent().metadata_uri, "ipfs://bob");
}

#[tokio::test]
async fn test_read_only_queries() {
    let wallet = MockWallet::new(&[ALICE], EXPECTED_CHAIN)
        .with_agent(ALICE, registered("ipfs://alice", 150))
        .with_agent(BOB, AgentFixture::default());
    wallet.make_issuer(BOB);
    // Queries work without a session
    let engine = engine_for(&wallet);

    let graph = engine.social_graph(ALICE).await.unwrap();
    assert_eq!(graph.follower_count, 1);
    assert_eq!(graph.following_count, 2);
    assert_eq!(graph.following, vec![BOB, CAROL]);

    let report = engine.reputation(ALICE).await.unwrap();
    assert!(report.is_registered);
    assert_eq!(report.reputation_score, "150");
    assert_eq!(report.token_balance, "150");
    assert_eq!(report.token_symbol.as_deref(), Some("REP"));
    assert_eq!(report.is_issuer, Some(false));
    assert_eq!(engine.reputation(BOB).await.unwrap().is_issuer, Some(true));

    assert_eq!(engine.registered_agents().await.unwrap(), vec![ALICE, BOB]);
    assert!(engine.is_following(ALICE, CAROL).await.unwrap());
    assert!(!engine.is_following(BOB, ALICE).await.unwrap());

    let status = engine.agent_status(ALICE).await.unwrap();
    assert_eq!(status.metadata_uri, "ipfs://alice");
    // Queries never touch the session snapshot
    assert_eq!(engine.agent(), AgentRecord::default());
    assert!(!engine.connection().connected);
}
