//! Property tests for normalization invariants.
//!
//! Uses proptest to verify:
//! 1. Scale invariant — billions/millions rescaling is exact division
//! 2. Validation — normalize fails iff a required field is missing
//! 3. Bucket conservation — total market cap survives "Others" bucketing
//! 4. Sort-and-limit — output length and ordering obey the contract

use coinboard_core::data::normalize::{bucket_tail, normalize, sort_and_limit, SortKey};
use coinboard_core::data::provider::RawMarketRecord;
use coinboard_core::domain::{MarketTable, NormalizedRecord};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_positive() -> impl Strategy<Value = f64> {
    1e-3..1e13_f64
}

fn arb_record() -> impl Strategy<Value = RawMarketRecord> {
    (
        "[a-z]{3,12}",
        "[a-z]{2,6}",
        arb_positive(),
        arb_positive(),
        arb_positive(),
    )
        .prop_map(|(id, symbol, price, cap, volume)| RawMarketRecord {
            id: Some(id),
            symbol: Some(symbol),
            current_price: Some(price),
            market_cap: Some(cap),
            total_volume: Some(volume),
        })
}

fn arb_row() -> impl Strategy<Value = NormalizedRecord> {
    ("[a-z]{2,8}", arb_positive(), arb_positive(), arb_positive()).prop_map(
        |(symbol, price, cap_b, vol_m)| NormalizedRecord {
            id: symbol.clone(),
            symbol,
            current_price: price,
            market_cap_billions: cap_b,
            volume_millions: vol_m,
        },
    )
}

// ── 1. Scale invariant ───────────────────────────────────────────────

proptest! {
    /// Every normalized row satisfies the exact division contract:
    /// marketCapBillions == market_cap / 1e9, volumeMillions == total_volume / 1e6.
    #[test]
    fn scale_transform_is_exact_division(records in prop::collection::vec(arb_record(), 0..20)) {
        let table = normalize(records.clone()).unwrap();
        prop_assert_eq!(table.len(), records.len());

        for (raw, row) in records.iter().zip(table.rows()) {
            prop_assert_eq!(row.current_price, raw.current_price.unwrap());
            prop_assert_eq!(row.market_cap_billions, raw.market_cap.unwrap() / 1e9);
            prop_assert_eq!(row.volume_millions, raw.total_volume.unwrap() / 1e6);
        }
    }
}

// ── 2. Validation ────────────────────────────────────────────────────

proptest! {
    /// normalize fails exactly when at least one required field is missing
    /// from at least one row.
    #[test]
    fn normalize_fails_iff_a_field_is_missing(
        mut records in prop::collection::vec(arb_record(), 1..20),
        victim in any::<prop::sample::Index>(),
        field in 0..5usize,
        knock_out in prop::bool::ANY,
    ) {
        if knock_out {
            let idx = victim.index(records.len());
            let row = &mut records[idx];
            match field {
                0 => row.id = None,
                1 => row.symbol = None,
                2 => row.current_price = None,
                3 => row.market_cap = None,
                _ => row.total_volume = None,
            }
        }

        let result = normalize(records);
        prop_assert_eq!(result.is_err(), knock_out);
    }
}

// ── 3. Bucket conservation ───────────────────────────────────────────

proptest! {
    /// Total market cap is conserved across bucketing for any top_n in
    /// [0, len]. Summing the tail re-associates float addition, so the
    /// comparison uses a relative tolerance rather than bitwise equality.
    #[test]
    fn bucketing_conserves_total_market_cap(
        rows in prop::collection::vec(arb_row(), 0..25),
        top_n_sel in any::<prop::sample::Index>(),
    ) {
        let table = MarketTable::new(rows);
        let top_n = top_n_sel.index(table.len() + 1);

        let before = table.total_market_cap_billions();
        let after = bucket_tail(&table, top_n).total_market_cap_billions();

        let tolerance = before.abs().max(1.0) * 1e-9;
        prop_assert!((before - after).abs() <= tolerance,
            "before={before}, after={after}, top_n={top_n}");
    }

    /// Bucketing yields min(top_n, len) kept rows plus one synthetic row
    /// when anything was collapsed.
    #[test]
    fn bucketing_row_count(
        rows in prop::collection::vec(arb_row(), 0..25),
        top_n_sel in any::<prop::sample::Index>(),
    ) {
        let table = MarketTable::new(rows);
        let top_n = top_n_sel.index(table.len() + 1);

        let bucketed = bucket_tail(&table, top_n);
        let expected = if table.len() > top_n { top_n + 1 } else { table.len() };
        prop_assert_eq!(bucketed.len(), expected);
    }
}

// ── 4. Sort-and-limit ────────────────────────────────────────────────

proptest! {
    /// Output length is min(limit, len) and the chosen key is monotone in
    /// the requested direction.
    #[test]
    fn sort_and_limit_length_and_ordering(
        rows in prop::collection::vec(arb_row(), 0..30),
        limit in 0..40usize,
        descending in prop::bool::ANY,
    ) {
        let table = MarketTable::new(rows);
        let sorted = sort_and_limit(&table, SortKey::MarketCap, descending, limit);

        prop_assert_eq!(sorted.len(), limit.min(table.len()));

        for pair in sorted.rows().windows(2) {
            if descending {
                prop_assert!(pair[0].market_cap_billions >= pair[1].market_cap_billions);
            } else {
                prop_assert!(pair[0].market_cap_billions <= pair[1].market_cap_billions);
            }
        }
    }
}
