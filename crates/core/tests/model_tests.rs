use chrono::NaiveDate;
use budget_tracker_core::models::budget_data::{BudgetData, ImportDocument};
use budget_tracker_core::models::frequency::Frequency;
use budget_tracker_core::models::month::YearMonth;
use budget_tracker_core::models::obligation::{Obligation, ObligationKind, SavingsEntry};
use budget_tracker_core::models::record_id::RecordId;
use budget_tracker_core::models::settings::{Settings, DEFAULT_STORAGE_KEY};
use budget_tracker_core::models::transaction::{Transaction, TransactionFilter, TransactionKind};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn obligation(name: &str, amount: f64, frequency: Frequency) -> Obligation {
    Obligation {
        id: RecordId::new(),
        name: name.into(),
        amount,
        frequency,
        next_payment: d(2026, 1, 1),
        category: "Utilities".into(),
        source: "Checking Account".into(),
        flagged: false,
        savings_log: frequency.accrues().then(Vec::new),
    }
}

fn entry(amount: f64) -> SavingsEntry {
    SavingsEntry {
        date: d(2025, 11, 1).and_hms_opt(12, 0, 0).unwrap().and_utc(),
        amount,
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Frequency
// ═══════════════════════════════════════════════════════════════════

mod frequency {
    use super::*;

    #[test]
    fn period_months() {
        assert_eq!(Frequency::Monthly.period_months(), 1);
        assert_eq!(Frequency::Quarterly.period_months(), 3);
        assert_eq!(Frequency::SemiAnnual.period_months(), 6);
        assert_eq!(Frequency::Annual.period_months(), 12);
    }

    #[test]
    fn only_monthly_does_not_accrue() {
        assert!(!Frequency::Monthly.accrues());
        assert!(Frequency::Quarterly.accrues());
        assert!(Frequency::SemiAnnual.accrues());
        assert!(Frequency::Annual.accrues());
    }

    #[test]
    fn default_is_monthly() {
        assert_eq!(Frequency::default(), Frequency::Monthly);
    }

    #[test]
    fn display_uses_form_labels() {
        assert_eq!(Frequency::SemiAnnual.to_string(), "Semi-Annual");
        assert_eq!(Frequency::Annual.to_string(), "Annual");
    }

    #[test]
    fn parse_is_lenient_about_case_and_separators() {
        assert_eq!(Frequency::parse("quarterly"), Some(Frequency::Quarterly));
        assert_eq!(Frequency::parse("Semi Annual"), Some(Frequency::SemiAnnual));
        assert_eq!(Frequency::parse("semi_annual"), Some(Frequency::SemiAnnual));
        assert_eq!(Frequency::parse(" ANNUAL "), Some(Frequency::Annual));
        assert_eq!(Frequency::parse("fortnightly"), None);
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Frequency::SemiAnnual).unwrap();
        assert_eq!(json, "\"Semi-Annual\"");
    }

    #[test]
    fn serde_roundtrip_all() {
        for f in Frequency::ALL {
            let json = serde_json::to_string(&f).unwrap();
            let back: Frequency = serde_json::from_str(&json).unwrap();
            assert_eq!(f, back);
        }
    }

    #[test]
    fn unknown_label_deserializes_as_monthly() {
        let f: Frequency = serde_json::from_str("\"Biweekly\"").unwrap();
        assert_eq!(f, Frequency::Monthly);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  YearMonth
// ═══════════════════════════════════════════════════════════════════

mod year_month {
    use super::*;

    #[test]
    fn new_rejects_bad_month() {
        assert!(YearMonth::new(2025, 0).is_none());
        assert!(YearMonth::new(2025, 13).is_none());
        assert!(YearMonth::new(2025, 12).is_some());
    }

    #[test]
    fn of_ignores_day() {
        assert_eq!(YearMonth::of(d(2025, 6, 15)), YearMonth::of(d(2025, 6, 1)));
    }

    #[test]
    fn months_until_counts_calendar_months() {
        let oct = YearMonth::of(d(2025, 10, 31));
        assert_eq!(oct.months_until(YearMonth::of(d(2025, 11, 1))), 1);
        assert_eq!(oct.months_until(YearMonth::of(d(2026, 1, 1))), 3);
        assert_eq!(oct.months_until(YearMonth::of(d(2025, 9, 30))), -1);
    }

    #[test]
    fn minus_months_crosses_year_boundary() {
        let jan = YearMonth::new(2026, 1).unwrap();
        assert_eq!(jan.minus_months(3), YearMonth::new(2025, 10).unwrap());
        assert_eq!(jan.minus_months(12), YearMonth::new(2025, 1).unwrap());
        assert_eq!(jan.minus_months(13), YearMonth::new(2024, 12).unwrap());
    }

    #[test]
    fn parse_and_display() {
        let ym = YearMonth::parse("2025-03").unwrap();
        assert_eq!(ym, YearMonth::new(2025, 3).unwrap());
        assert_eq!(ym.to_string(), "2025-03");
        assert!(YearMonth::parse("2025").is_none());
        assert!(YearMonth::parse("2025-13").is_none());
    }

    #[test]
    fn contains() {
        let ym = YearMonth::new(2025, 11).unwrap();
        assert!(ym.contains(d(2025, 11, 30)));
        assert!(!ym.contains(d(2025, 12, 1)));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Obligation
// ═══════════════════════════════════════════════════════════════════

mod obligation_model {
    use super::*;

    #[test]
    fn logged_total_sums_entries() {
        let mut o = obligation("Car insurance", 600.0, Frequency::Annual);
        o.savings_log = Some(vec![entry(50.0), entry(25.5)]);
        assert!((o.logged_total() - 75.5).abs() < 1e-9);
    }

    #[test]
    fn logged_total_without_log_is_zero() {
        let o = obligation("Netflix", 15.0, Frequency::Monthly);
        assert!(o.savings_log.is_none());
        assert_eq!(o.logged_total(), 0.0);
    }

    #[test]
    fn serializes_camel_case_keys() {
        let o = obligation("Water", 90.0, Frequency::Quarterly);
        let json = serde_json::to_value(&o).unwrap();
        assert_eq!(json["nextPayment"], "2026-01-01");
        assert_eq!(json["frequency"], "Quarterly");
        assert!(json["savingsLog"].is_array());
    }

    #[test]
    fn monthly_obligation_omits_savings_log() {
        let o = obligation("Gym", 40.0, Frequency::Monthly);
        let json = serde_json::to_value(&o).unwrap();
        assert!(json.get("savingsLog").is_none());
    }

    #[test]
    fn missing_optional_fields_get_defaults() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "name": "Domain",
            "amount": 12.0,
            "nextPayment": "2026-03-01"
        }"#;
        let o: Obligation = serde_json::from_str(json).unwrap();
        assert_eq!(o.frequency, Frequency::Monthly);
        assert_eq!(o.category, "");
        assert!(!o.flagged);
        assert!(o.savings_log.is_none());
    }

    #[test]
    fn legacy_flag_keys_are_accepted() {
        let sub = r#"{"id":"00000000-0000-0000-0000-000000000002","name":"A","amount":1.0,
            "nextPayment":"2026-01-01","flaggedForCancellation":true}"#;
        let bill = r#"{"id":"00000000-0000-0000-0000-000000000003","name":"B","amount":1.0,
            "nextPayment":"2026-01-01","flaggedForReview":true}"#;
        assert!(serde_json::from_str::<Obligation>(sub).unwrap().flagged);
        assert!(serde_json::from_str::<Obligation>(bill).unwrap().flagged);
    }

    #[test]
    fn kind_fallback_categories() {
        assert_eq!(ObligationKind::Subscription.fallback_category(), "Subscriptions");
        assert_eq!(ObligationKind::Bill.fallback_category(), "Bills");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Transaction
// ═══════════════════════════════════════════════════════════════════

mod transaction_model {
    use super::*;

    #[test]
    fn kind_serializes_under_type_key() {
        let t = Transaction {
            id: RecordId::new(),
            kind: TransactionKind::Expense,
            amount: 12.5,
            description: "Lunch".into(),
            category: "Dining Out".into(),
            source: "Cash".into(),
            date: d(2025, 11, 3),
        };
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2025-11-03");
    }

    #[test]
    fn filter_matches() {
        assert!(TransactionFilter::All.matches(TransactionKind::Income));
        assert!(TransactionFilter::Only(TransactionKind::Income).matches(TransactionKind::Income));
        assert!(!TransactionFilter::Only(TransactionKind::Income).matches(TransactionKind::Expense));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  BudgetData & ImportDocument
// ═══════════════════════════════════════════════════════════════════

mod budget_data {
    use super::*;

    #[test]
    fn empty_document_deserializes_to_defaults() {
        let data: BudgetData = serde_json::from_str("{}").unwrap();
        assert_eq!(data, BudgetData::default());
    }

    #[test]
    fn serializes_savings_balance_camel_case() {
        let data = BudgetData {
            savings_balance: 250.0,
            ..Default::default()
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["savingsBalance"], 250.0);
        assert!(json["transactions"].as_array().unwrap().is_empty());
    }

    #[test]
    fn all_obligations_lists_subscriptions_then_bills() {
        let data = BudgetData {
            subscriptions: vec![obligation("S", 10.0, Frequency::Monthly)],
            bills: vec![obligation("B", 300.0, Frequency::Quarterly)],
            ..Default::default()
        };
        let kinds: Vec<ObligationKind> = data.all_obligations().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![ObligationKind::Subscription, ObligationKind::Bill]);
    }

    #[test]
    fn accruing_obligations_skip_monthly() {
        let data = BudgetData {
            subscriptions: vec![
                obligation("Monthly", 10.0, Frequency::Monthly),
                obligation("Annual", 120.0, Frequency::Annual),
            ],
            bills: vec![obligation("Quarterly", 300.0, Frequency::Quarterly)],
            ..Default::default()
        };
        let names: Vec<&str> = data.accruing_obligations().map(|(_, o)| o.name.as_str()).collect();
        assert_eq!(names, vec!["Annual", "Quarterly"]);
    }

    #[test]
    fn import_leaves_absent_collections_unchanged() {
        let mut data = BudgetData {
            subscriptions: vec![obligation("Keep me", 10.0, Frequency::Monthly)],
            savings_balance: 400.0,
            ..Default::default()
        };
        let doc: ImportDocument = serde_json::from_str(r#"{"bills": []}"#).unwrap();
        doc.merge_into(&mut data);
        assert_eq!(data.subscriptions.len(), 1);
        assert_eq!(data.savings_balance, 400.0);
    }

    #[test]
    fn import_replaces_present_collections_even_when_empty() {
        let mut data = BudgetData {
            bills: vec![obligation("Gone", 10.0, Frequency::Monthly)],
            ..Default::default()
        };
        let doc: ImportDocument =
            serde_json::from_str(r#"{"bills": [], "savingsBalance": 0}"#).unwrap();
        doc.merge_into(&mut data);
        assert!(data.bills.is_empty());
        assert_eq!(data.savings_balance, 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  RecordId & lenient amounts
// ═══════════════════════════════════════════════════════════════════

mod legacy_shapes {
    use super::*;

    #[test]
    fn numeric_id_is_kept_and_written_back_as_number() {
        let id: RecordId = serde_json::from_str("1731000000001").unwrap();
        assert_eq!(id, RecordId::Legacy(1_731_000_000_001));
        assert_eq!(serde_json::to_string(&id).unwrap(), "1731000000001");
        assert_eq!(id.to_string(), "1731000000001");
    }

    #[test]
    fn uuid_id_round_trips_as_string() {
        let id = RecordId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.starts_with('"'));
        assert_eq!(serde_json::from_str::<RecordId>(&json).unwrap(), id);
    }

    #[test]
    fn new_ids_are_uuids() {
        assert!(matches!(RecordId::new(), RecordId::Uuid(_)));
        assert_ne!(RecordId::new(), RecordId::new());
    }

    #[test]
    fn string_amounts_are_parsed() {
        let json = r#"{"id":1731000000002,"name":"Car insurance","amount":"1200.00",
            "frequency":"Annual","nextPayment":"2026-06-01","savingsLog":[]}"#;
        let o: Obligation = serde_json::from_str(json).unwrap();
        assert_eq!(o.id, RecordId::Legacy(1_731_000_000_002));
        assert_eq!(o.amount, 1200.0);
        assert_eq!(serde_json::to_value(&o).unwrap()["amount"], 1200.0);
    }

    #[test]
    fn string_limit_and_transaction_amount_are_parsed() {
        let budget: budget_tracker_core::models::budget::Budget =
            serde_json::from_str(r#"{"id":1,"category":"Groceries","limit":"400.00"}"#).unwrap();
        assert_eq!(budget.limit, 400.0);

        let t: Transaction = serde_json::from_str(
            r#"{"id":2,"type":"expense","amount":"12.50","category":"Dining Out","date":"2025-11-03"}"#,
        )
        .unwrap();
        assert_eq!(t.amount, 12.5);
        assert_eq!(t.description, "");
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let json = r#"{"id":3,"name":"X","amount":"abc","nextPayment":"2026-01-01"}"#;
        assert!(serde_json::from_str::<Obligation>(json).is_err());
    }

    #[test]
    fn null_savings_balance_reads_as_zero() {
        let data: BudgetData = serde_json::from_str(r#"{"savingsBalance": null}"#).unwrap();
        assert_eq!(data.savings_balance, 0.0);

        let doc: ImportDocument = serde_json::from_str(r#"{"savingsBalance": null}"#).unwrap();
        assert_eq!(doc.savings_balance, Some(0.0));

        let absent: ImportDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.savings_balance, None);
    }

    #[test]
    fn string_savings_balance_is_parsed() {
        let data: BudgetData = serde_json::from_str(r#"{"savingsBalance": "250.5"}"#).unwrap();
        assert_eq!(data.savings_balance, 250.5);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(s.storage_key, "budgetData");
        assert_eq!(s.upcoming_window_days, 7);
        assert_eq!(s.due_soon_days, 30);
        assert_eq!(s.budget_warning_pct, 80.0);
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let s: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(s.currency_symbol, "€");
        assert_eq!(s.storage_key, "budgetData");
    }

    #[test]
    fn format_amount_rounds_to_cents() {
        let s = Settings::default();
        assert_eq!(s.format_amount(1234.5), "$1234.50");
        assert_eq!(s.format_amount(33.333), "$33.33");
        assert_eq!(s.format_amount(-5.0), "-$5.00");
    }
}
