use borsh::BorshDeserialize;
use solana_program::pubkey::Pubkey;
use solana_program_test::{processor, BanksClient, ProgramTest};
use solana_sdk::{
    hash::Hash,
    signature::{Keypair, Signer},
    transaction::Transaction,
};

use floor_monitor::{
    instruction::{
        initialize_monitor, register_collection, respond, set_detector_authorization,
        set_emergency_override,
    },
    state::{CollectionStatus, CrashHistory, CrashKind, MonitorConfig, ResponsePayload},
};

const DETECTED_AT: i64 = 1_700_000_000;

struct Harness {
    banks_client: BanksClient,
    payer: Keypair,
    recent_blockhash: Hash,
    program_id: Pubkey,
    config_pda: Pubkey,
    status_pda: Pubkey,
    history_pda: Pubkey,
    collection_id: Pubkey,
    detector: Keypair,
}

impl Harness {
    /// Initialize the monitor, register one collection and authorize
    /// one detector, with the payer as owner.
    async fn new() -> Self {
        let program_id = Pubkey::new_unique();
        let program_test = ProgramTest::new(
            "floor_monitor",
            program_id,
            processor!(floor_monitor::process),
        );

        let (banks_client, payer, recent_blockhash) = program_test.start().await;

        let collection_id = Pubkey::new_unique();
        let detector = Keypair::new();

        let (config_pda, _) =
            Pubkey::find_program_address(&[MonitorConfig::SEED], &program_id);
        let (status_pda, _) = Pubkey::find_program_address(
            &[CollectionStatus::SEED, collection_id.as_ref()],
            &program_id,
        );
        let (history_pda, _) = Pubkey::find_program_address(
            &[CrashHistory::SEED, collection_id.as_ref()],
            &program_id,
        );

        let mut harness = Self {
            banks_client,
            payer,
            recent_blockhash,
            program_id,
            config_pda,
            status_pda,
            history_pda,
            collection_id,
            detector,
        };

        let init_ix = initialize_monitor(
            &harness.program_id,
            &harness.payer.pubkey(),
            &harness.config_pda,
        );
        let register_ix = register_collection(
            &harness.program_id,
            &harness.payer.pubkey(),
            &harness.config_pda,
            &harness.status_pda,
            &harness.history_pda,
            harness.collection_id,
        );
        let authorize_ix = set_detector_authorization(
            &harness.program_id,
            &harness.payer.pubkey(),
            &harness.config_pda,
            harness.detector.pubkey(),
            true,
        );

        let mut transaction = Transaction::new_with_payer(
            &[init_ix, register_ix, authorize_ix],
            Some(&harness.payer.pubkey()),
        );
        transaction.sign(&[&harness.payer], harness.recent_blockhash);
        harness
            .banks_client
            .process_transaction(transaction)
            .await
            .unwrap();

        harness
    }

    fn payload(&self, kind: CrashKind, severity_bps: u64) -> ResponsePayload {
        ResponsePayload {
            reporter_tag: "det-1".to_string(),
            collection_id: self.collection_id,
            current_price: 6_000_000_000,
            baseline_price: 10_000_000_000,
            crash_kind: kind.as_u8(),
            detected_at: DETECTED_AT,
            severity_bps,
        }
    }

    async fn send_respond(
        &mut self,
        signer: &Keypair,
        payload: ResponsePayload,
    ) -> Result<(), solana_program_test::BanksClientError> {
        let respond_ix = respond(
            &self.program_id,
            &signer.pubkey(),
            &self.config_pda,
            &self.status_pda,
            &self.history_pda,
            payload,
        );

        let mut transaction =
            Transaction::new_with_payer(&[respond_ix], Some(&self.payer.pubkey()));
        transaction.sign(&[&self.payer, signer], self.recent_blockhash);
        self.banks_client.process_transaction(transaction).await
    }

    async fn read<T: BorshDeserialize>(&mut self, address: Pubkey) -> T {
        let account = self
            .banks_client
            .get_account(address)
            .await
            .unwrap()
            .unwrap();
        T::deserialize(&mut account.data.as_slice()).unwrap()
    }
}

#[tokio::test]
async fn test_flash_crash_response_escalates_to_emergency() {
    let mut harness = Harness::new().await;

    let detector = Keypair::from_bytes(&harness.detector.to_bytes()).unwrap();
    let payload = harness.payload(CrashKind::FlashCrash, 4_000);
    harness.send_respond(&detector, payload).await.unwrap();

    let status: CollectionStatus = harness.read(harness.status_pda).await;
    assert!(status.emergency_mode);
    assert_eq!(status.crash_count, 1);
    assert_eq!(status.last_crash_at, DETECTED_AT);
    assert_eq!(status.last_crash_price, 6_000_000_000);
    assert!(!status.is_healthy(DETECTED_AT + 10_000));

    let history: CrashHistory = harness.read(harness.history_pda).await;
    assert_eq!(history.next_sequence, 1);
    let recent = history.recent(20);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].sequence, 0);
    assert_eq!(recent[0].crash_kind, CrashKind::FlashCrash);
    assert_eq!(recent[0].severity_bps, 4_000);
    assert_eq!(recent[0].reporter_tag, "det-1");

    let config: MonitorConfig = harness.read(harness.config_pda).await;
    assert_eq!(config.total_crashes, 1);
}

#[tokio::test]
async fn test_low_severity_flash_crash_does_not_escalate() {
    let mut harness = Harness::new().await;

    let detector = Keypair::from_bytes(&harness.detector.to_bytes()).unwrap();
    let payload = harness.payload(CrashKind::FlashCrash, 1_999);
    harness.send_respond(&detector, payload).await.unwrap();

    let status: CollectionStatus = harness.read(harness.status_pda).await;
    assert!(!status.emergency_mode);
    assert_eq!(status.crash_count, 1);
    // Still unhealthy inside the silence window, healthy after it
    assert!(!status.is_healthy(DETECTED_AT + 1_200));
    assert!(status.is_healthy(DETECTED_AT + 1_201));
}

#[tokio::test]
async fn test_unauthorized_detector_is_rejected_without_mutation() {
    let mut harness = Harness::new().await;

    let intruder = Keypair::new();
    let payload = harness.payload(CrashKind::FlashCrash, 4_000);
    let result = harness.send_respond(&intruder, payload).await;
    assert!(result.is_err());

    let status: CollectionStatus = harness.read(harness.status_pda).await;
    assert!(!status.emergency_mode);
    assert_eq!(status.crash_count, 0);
    assert_eq!(status.last_crash_at, 0);

    let history: CrashHistory = harness.read(harness.history_pda).await;
    assert_eq!(history.next_sequence, 0);
    assert!(history.records.is_empty());

    let config: MonitorConfig = harness.read(harness.config_pda).await;
    assert_eq!(config.total_crashes, 0);
}

#[tokio::test]
async fn test_invalid_crash_kind_is_rejected() {
    let mut harness = Harness::new().await;

    let detector = Keypair::from_bytes(&harness.detector.to_bytes()).unwrap();
    let mut payload = harness.payload(CrashKind::FlashCrash, 4_000);
    payload.crash_kind = 9;
    assert!(harness.send_respond(&detector, payload).await.is_err());

    let mut payload = harness.payload(CrashKind::FlashCrash, 4_000);
    payload.current_price = 0;
    assert!(harness.send_respond(&detector, payload).await.is_err());

    let mut payload = harness.payload(CrashKind::FlashCrash, 4_000);
    payload.reporter_tag.clear();
    assert!(harness.send_respond(&detector, payload).await.is_err());

    let history: CrashHistory = harness.read(harness.history_pda).await;
    assert_eq!(history.next_sequence, 0);
}

#[tokio::test]
async fn test_manipulation_always_escalates() {
    let mut harness = Harness::new().await;

    let detector = Keypair::from_bytes(&harness.detector.to_bytes()).unwrap();
    let payload = harness.payload(CrashKind::Manipulation, 0);
    harness.send_respond(&detector, payload).await.unwrap();

    let status: CollectionStatus = harness.read(harness.status_pda).await;
    assert!(status.emergency_mode);
}

#[tokio::test]
async fn test_owner_override_clears_emergency_mode() {
    let mut harness = Harness::new().await;

    let detector = Keypair::from_bytes(&harness.detector.to_bytes()).unwrap();
    let payload = harness.payload(CrashKind::FlashCrash, 4_500);
    harness.send_respond(&detector, payload).await.unwrap();

    let status: CollectionStatus = harness.read(harness.status_pda).await;
    assert!(status.emergency_mode);

    // Emergency mode never clears on its own; only the owner override
    // brings the collection back to normal.
    let override_ix = set_emergency_override(
        &harness.program_id,
        &harness.payer.pubkey(),
        &harness.config_pda,
        &harness.status_pda,
        harness.collection_id,
        false,
        "manual review: marketplace outage, not a crash".to_string(),
    );
    let mut transaction =
        Transaction::new_with_payer(&[override_ix], Some(&harness.payer.pubkey()));
    transaction.sign(&[&harness.payer], harness.recent_blockhash);
    harness
        .banks_client
        .process_transaction(transaction)
        .await
        .unwrap();

    let status: CollectionStatus = harness.read(harness.status_pda).await;
    assert!(!status.emergency_mode);
    // Crash bookkeeping survives the override
    assert_eq!(status.crash_count, 1);
}

#[tokio::test]
async fn test_deauthorized_detector_loses_access() {
    let mut harness = Harness::new().await;

    let revoke_ix = set_detector_authorization(
        &harness.program_id,
        &harness.payer.pubkey(),
        &harness.config_pda,
        harness.detector.pubkey(),
        false,
    );
    let mut transaction =
        Transaction::new_with_payer(&[revoke_ix], Some(&harness.payer.pubkey()));
    transaction.sign(&[&harness.payer], harness.recent_blockhash);
    harness
        .banks_client
        .process_transaction(transaction)
        .await
        .unwrap();

    let detector = Keypair::from_bytes(&harness.detector.to_bytes()).unwrap();
    let payload = harness.payload(CrashKind::FlashCrash, 4_000);
    assert!(harness.send_respond(&detector, payload).await.is_err());
}
