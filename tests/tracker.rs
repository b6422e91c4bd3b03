use std::{path::PathBuf, sync::Arc};

use chrono::NaiveDate;
use fractic_rental_payment_tracker::{
    datasources::{
        load_tracker_config, InMemoryRecordStoreDatasource, JsonFileRecordStoreDatasource,
    },
    entities::{
        BillingPeriod, EntryDraft, EntryPatch, SettingsPatch, WalletTemplateId,
        WalletTransaction, WalletTransactionId,
    },
    repositories::{InMemoryWalletRepository, UnavailableWalletRepository},
    util::RentalPaymentTrackerUtil,
};

fn draft(month: u32, previous: f64, current: f64, amount_paid: f64) -> EntryDraft {
    EntryDraft {
        period: BillingPeriod::new(2024, month).unwrap(),
        previous_meter_reading: previous,
        current_meter_reading: current,
        electricity_rate: 0.5,
        utility_bill: 10.0,
        rental_fee: 500.0,
        amount_paid,
        meter_reading_image: None,
        bank_statement: None,
        auto_create_wallet_transaction: false,
    }
}

fn temp_store_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "rental-payment-tracker-it-{}-{}.json",
        name,
        std::process::id()
    ))
}

#[tokio::test]
async fn tracks_prepayment_across_months() {
    let tracker = RentalPaymentTrackerUtil::new(
        Arc::new(InMemoryRecordStoreDatasource::new()),
        Arc::new(UnavailableWalletRepository),
        load_tracker_config(r#"(currency: "MYR")"#).unwrap(),
    );
    tracker
        .update_settings(SettingsPatch {
            initial_prepayment: Some(100.0),
            electricity_rate: Some(0.5),
            utility_bill: Some(10.0),
            rental_fee: Some(500.0),
            ..Default::default()
        })
        .await
        .unwrap();

    tracker.create_entry(draft(1, 1000.0, 1050.0, 600.0)).await.unwrap();
    let defaults = tracker
        .new_entry_defaults(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap())
        .await
        .unwrap();
    assert_eq!(defaults.previous_meter_reading, 1050.0);
    let feb = tracker
        .create_entry(EntryDraft {
            current_meter_reading: 1110.0,
            amount_paid: 500.0,
            ..defaults
        })
        .await
        .unwrap();
    assert_eq!(tracker.current_prepayment().await.unwrap(), 125.0);

    // Correcting February's payment flows through to the balance.
    tracker
        .update_entry(
            &feb.id,
            EntryPatch {
                amount_paid: Some(540.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(tracker.current_prepayment().await.unwrap(), 165.0);

    let statement = tracker.statement().await.unwrap();
    assert!(statement.contains("Prepaid amount: RM 165.00"));
    assert!(statement.find("Feb 2024\n").unwrap() < statement.find("Jan 2024\n").unwrap());

    let csv = tracker.export_csv().await.unwrap();
    assert_eq!(csv.lines().count(), 3);

    tracker.remove_entry(&feb.id).await.unwrap();
    assert_eq!(tracker.current_prepayment().await.unwrap(), 165.0);
    assert_eq!(tracker.entries().await.unwrap().len(), 1);
}

#[tokio::test]
async fn wallet_linked_payments_override_stored_amounts() {
    let wallet = Arc::new(InMemoryWalletRepository::new());
    let tracker = RentalPaymentTrackerUtil::new(
        Arc::new(InMemoryRecordStoreDatasource::new()),
        wallet.clone(),
        Default::default(),
    );
    tracker
        .update_settings(SettingsPatch {
            link_with_wallet: Some(true),
            wallet_template_id: Some(Some(WalletTemplateId::new("rent"))),
            ..Default::default()
        })
        .await
        .unwrap();

    let mut jan_draft = draft(1, 1000.0, 1050.0, 600.0);
    jan_draft.auto_create_wallet_transaction = true;
    let jan = tracker.create_entry(jan_draft).await.unwrap();
    let txn = jan.wallet_entry_id.clone().unwrap();
    assert_eq!(tracker.current_prepayment().await.unwrap(), 65.0);

    wallet
        .insert_transaction(WalletTransaction {
            id: txn.clone(),
            amount: 700.0,
        })
        .await;
    assert_eq!(tracker.current_prepayment().await.unwrap(), 165.0);

    // A deleted transaction falls back to the stored (zeroed) amount.
    wallet.remove_transaction(&txn).await;
    assert_eq!(tracker.current_prepayment().await.unwrap(), -535.0);
    assert_eq!(tracker.cleanup_orphaned_wallet_links().await.unwrap(), 1);
    let jan = tracker.entry(&jan.id).await.unwrap();
    assert!(!jan.is_linked());
    assert_eq!(jan.amount_paid, 0.0);

    wallet
        .insert_transaction(WalletTransaction {
            id: WalletTransactionId::new("manual-1"),
            amount: 535.0,
        })
        .await;
    tracker
        .link_wallet_transaction(&jan.id, &WalletTransactionId::new("manual-1"))
        .await
        .unwrap();
    assert_eq!(tracker.current_prepayment().await.unwrap(), 0.0);
    let jan = tracker.unlink_wallet_transaction(&jan.id).await.unwrap();
    assert_eq!(jan.amount_paid, 535.0);
}

#[tokio::test]
async fn json_store_survives_reopen() {
    let path = temp_store_path("reopen");
    let _ = std::fs::remove_file(&path);

    {
        let tracker = RentalPaymentTrackerUtil::new(
            Arc::new(JsonFileRecordStoreDatasource::open(&path).await.unwrap()),
            Arc::new(UnavailableWalletRepository),
            Default::default(),
        );
        tracker
            .import_csv(
                "period,previous_meter_reading,current_meter_reading,electricity_rate,utility_bill,rental_fee,amount_paid\n\
                 2024-01,1000,1050,0.5,10,500,600\n\
                 2024-02,1050,1110,0.5,10,500,500\n",
            )
            .await
            .unwrap();
    }

    let tracker = RentalPaymentTrackerUtil::new(
        Arc::new(JsonFileRecordStoreDatasource::open(&path).await.unwrap()),
        Arc::new(UnavailableWalletRepository),
        Default::default(),
    );
    assert_eq!(tracker.entries().await.unwrap().len(), 2);
    assert_eq!(tracker.current_prepayment().await.unwrap(), 25.0);

    let _ = std::fs::remove_file(&path);
}
