// ═══════════════════════════════════════════════════════════════════
// Storage Tests — MemoryProfileStore, FileProfileStore, ProfileManager
// ═══════════════════════════════════════════════════════════════════

use household_planner_core::errors::CoreError;
use household_planner_core::models::account::{Account, AccountType, Owner};
use household_planner_core::models::asset::AssetType;
use household_planner_core::models::household::{FilingStatus, Household};
use household_planner_core::models::investment::{Investment, Transaction};
use household_planner_core::models::person::{Coverage, TriState};
use household_planner_core::models::settings::{TransactionPolicy, LATEST_TAX_YEAR};
use household_planner_core::storage::file_store::FileProfileStore;
use household_planner_core::storage::manager::{ProfileManager, RESERVED_KEYS};
use household_planner_core::storage::memory::MemoryProfileStore;
use household_planner_core::storage::traits::ProfileStore;

fn sample_household() -> Household {
    let mut h = Household::new(FilingStatus::MarriedFilingJointly);
    h.settings.tax_year = 2025;
    h.settings.transaction_policy = TransactionPolicy::Replace;
    h.adjusted_gross_income = Some(180_000);
    h.people[0].name = Some("Alex".into());
    h.people[0].hsa.eligible = TriState::Yes;
    h.people[0].hsa.family = Some(Coverage::Family);
    h.people[1].name = Some("Sam".into());

    let mut roth = Account::new(AccountType::RothIra, Owner::First).with_custodian("Vanguard");
    roth.identifier = Some("Alex's".into());
    roth.investments.push(
        Investment::new("VTI", Some(AssetType::UsStockEtf), Some(1000.0))
            .with_expense_ratio(0.03)
            .with_transaction(Transaction::buy("VTI", 100.0)),
    );
    h.accounts.push(roth);
    h
}

// ═══════════════════════════════════════════════════════════════════
// MemoryProfileStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[tokio::test]
    async fn save_and_load() {
        let store = MemoryProfileStore::new();
        store.save("a", "{}").await.unwrap();
        assert_eq!(store.load("a").await.unwrap().as_deref(), Some("{}"));
        assert_eq!(store.load("b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_replaces() {
        let store = MemoryProfileStore::new();
        store.save("a", "1").await.unwrap();
        store.save("a", "2").await.unwrap();
        assert_eq!(store.load("a").await.unwrap().as_deref(), Some("2"));
        assert_eq!(store.list_keys().await.unwrap(), vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let store = MemoryProfileStore::new();
        store.save("a", "1").await.unwrap();
        store.save("b", "2").await.unwrap();
        store.clear().await.unwrap();
        assert!(store.list_keys().await.unwrap().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileProfileStore
// ═══════════════════════════════════════════════════════════════════

mod file_store {
    use super::*;

    #[tokio::test]
    async fn round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProfileStore::new(dir.path()).unwrap();

        store.save("Family", "{\"x\":1}").await.unwrap();
        assert!(dir.path().join("Family.json").exists());
        assert_eq!(store.load("Family").await.unwrap().as_deref(), Some("{\"x\":1}"));
        assert_eq!(store.load("Missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("profiles").join("v1");
        let store = FileProfileStore::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());
    }

    #[tokio::test]
    async fn lists_only_json_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProfileStore::new(dir.path()).unwrap();
        store.save("b", "{}").await.unwrap();
        store.save("a", "{}").await.unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(store.list_keys().await.unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn clear_keeps_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProfileStore::new(dir.path()).unwrap();
        store.save("a", "{}").await.unwrap();
        std::fs::write(dir.path().join("notes.txt"), "kept").unwrap();

        store.clear().await.unwrap();
        assert!(store.list_keys().await.unwrap().is_empty());
        assert!(dir.path().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProfileStore::new(dir.path()).unwrap();
        for key in ["", ".", "..", "../escape", "a/b", "a\\b"] {
            let err = store.save(key, "{}").await.unwrap_err();
            assert!(matches!(err, CoreError::ValidationError(_)), "{key:?}");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// ProfileManager
// ═══════════════════════════════════════════════════════════════════

mod profile_manager {
    use super::*;

    #[tokio::test]
    async fn round_trip_preserves_household() {
        let store = MemoryProfileStore::new();
        let household = sample_household();

        ProfileManager::save(&store, "Family", &household).await.unwrap();
        let loaded = ProfileManager::load(&store, "Family").await.unwrap();
        assert_eq!(loaded, household);
    }

    #[tokio::test]
    async fn round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProfileStore::new(dir.path()).unwrap();
        let household = sample_household();

        ProfileManager::save(&store, "Family", &household).await.unwrap();
        let loaded = ProfileManager::load(&store, "Family").await.unwrap();
        assert_eq!(loaded, household);
    }

    #[tokio::test]
    async fn missing_profile() {
        let store = MemoryProfileStore::new();
        let err = ProfileManager::load(&store, "Nobody").await.unwrap_err();
        assert!(matches!(err, CoreError::ProfileNotFound(ref k) if k == "Nobody"));
    }

    #[tokio::test]
    async fn corrupt_json_is_a_deserialization_error() {
        let store = MemoryProfileStore::new();
        store.save("Broken", "{ not json").await.unwrap();
        let err = ProfileManager::load(&store, "Broken").await.unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[tokio::test]
    async fn profile_names_skip_reserved_keys() {
        let store = MemoryProfileStore::new();
        for key in RESERVED_KEYS {
            store.save(key, "x").await.unwrap();
        }
        ProfileManager::save(&store, "Family", &Household::default()).await.unwrap();
        ProfileManager::save(&store, "Parents", &Household::default()).await.unwrap();

        let names = ProfileManager::profile_names(&store).await.unwrap();
        assert_eq!(names, vec!["Family".to_string(), "Parents".to_string()]);
    }

    #[tokio::test]
    async fn clear_profile_resets_to_empty_household() {
        let store = MemoryProfileStore::new();
        ProfileManager::save(&store, "Family", &sample_household()).await.unwrap();

        let fresh = ProfileManager::clear_profile(&store, "Family").await.unwrap();
        assert!(fresh.accounts.is_empty());
        assert_eq!(fresh.filing_status, FilingStatus::ChoiceNeeded);
        assert_eq!(fresh.settings.tax_year, LATEST_TAX_YEAR);

        let loaded = ProfileManager::load(&store, "Family").await.unwrap();
        assert!(loaded.accounts.is_empty());
    }

    #[tokio::test]
    async fn clear_all_empties_store() {
        let store = MemoryProfileStore::new();
        ProfileManager::save(&store, "Family", &sample_household()).await.unwrap();
        store.save("CurrentProfileName", "Family").await.unwrap();

        ProfileManager::clear_all(&store).await.unwrap();
        assert!(store.list_keys().await.unwrap().is_empty());
    }

    // ── JSON snapshots ────────────────────────────────────────────

    #[test]
    fn json_uses_camel_case() {
        let json = ProfileManager::to_json(&sample_household()).unwrap();
        assert!(json.contains("\"filingStatus\": \"marriedFilingJointly\""));
        assert!(json.contains("\"adjustedGrossIncome\": 180000"));
        assert!(json.contains("\"accountType\": \"Roth IRA\""));
        assert!(json.contains("\"assetType\": \"USStock_ETF\""));
        assert!(json.contains("\"transactionPolicy\": \"replace\""));
    }

    #[test]
    fn owners_follow_identifiers_on_load() {
        let json = r#"{
            "filingStatus": "marriedFilingJointly",
            "people": [
                { "index": 0, "name": "Alex" },
                { "index": 1, "name": "Sam" }
            ],
            "accounts": [
                { "identifier": "our", "accountType": "Brokerage", "owner": 1 },
                { "identifier": "Alex's", "accountType": "Roth IRA" },
                { "identifier": "Sam's", "accountType": "401k" },
                { "accountType": "HSA", "owner": 2 }
            ]
        }"#;

        let h = ProfileManager::from_json(json).unwrap();
        let owners: Vec<Owner> = h.accounts.iter().map(|a| a.owner).collect();
        assert_eq!(owners, vec![Owner::Joint, Owner::First, Owner::Second, Owner::Joint]);
        assert_eq!(h.accounts[2].account_type, Some(AccountType::Plan401k));
    }

    #[test]
    fn minimal_snapshot_loads() {
        let h = ProfileManager::from_json(r#"{ "people": [ { "index": 0 } ] }"#).unwrap();
        assert_eq!(h.filing_status, FilingStatus::ChoiceNeeded);
        assert!(h.accounts.is_empty());
        assert_eq!(h.settings.transaction_policy, TransactionPolicy::Additive);
    }

    #[test]
    fn unknown_asset_type_is_rejected() {
        let json = r#"{
            "filingStatus": "single",
            "people": [ { "index": 0 } ],
            "accounts": [
                { "accountType": "Brokerage",
                  "investments": [ { "ticker": "DOGE", "assetType": "Crypto" } ] }
            ]
        }"#;
        let err = ProfileManager::from_json(json).unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn people_must_match_filing_status() {
        let json = r#"{ "filingStatus": "marriedFilingJointly", "people": [ { "index": 0 } ] }"#;
        let err = ProfileManager::from_json(json).unwrap_err();
        assert!(matches!(err, CoreError::InconsistentHousehold(_)));
    }
}
