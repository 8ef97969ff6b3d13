use elements::masks::SLOTS_PER_CHUNK;
use elements::{BitBool, BoolColumn, Column, Elements, IntColumn, Len, Push, Scalar, NAN_INT};
use proptest::prelude::*;

/// States that never end a column early.
fn present_state() -> impl Strategy<Value = BitBool> {
    prop_oneof![Just(BitBool::False), Just(BitBool::True), Just(BitBool::NaN)]
}

fn any_state() -> impl Strategy<Value = BitBool> {
    prop_oneof![Just(BitBool::False), Just(BitBool::True), Just(BitBool::NaN), Just(BitBool::Null)]
}

fn int_value() -> impl Strategy<Value = i64> {
    prop_oneof![Just(NAN_INT), -1000i64..1000]
}

/// Folds arbitrary indices into `0 .. len`, keeping no more than `len` of them.
fn fold_indices(raw: &[usize], len: usize) -> Vec<usize> {
    if len == 0 { return Vec::new(); }
    raw.iter().take(len).map(|index| index % len).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        rng_seed: proptest::test_runner::RngSeed::Fixed(0),
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn append_sets_length(bits in proptest::collection::vec(any::<bool>(), 0..100)) {
        let scalars: Vec<Scalar> = bits.iter().map(|b| Scalar::Bool(*b)).collect();
        let mut column = BoolColumn::new();
        column.append(&scalars).unwrap();
        prop_assert_eq!(column.len(), bits.len());
        prop_assert_eq!(column.capacity() % SLOTS_PER_CHUNK, 0);
        prop_assert!(column.capacity() - column.len() < SLOTS_PER_CHUNK);
        for (position, bit) in bits.iter().enumerate() {
            prop_assert_eq!(column.location(position).unwrap().value, Scalar::Bool(*bit));
        }
        prop_assert!(column.location(bits.len()).is_err());
    }

    #[test]
    fn pushes_match_append(bits in proptest::collection::vec(any::<bool>(), 0..70)) {
        let mut pushed = BoolColumn::new();
        for bit in bits.iter() {
            pushed.push(*bit);
        }
        prop_assert_eq!(pushed, BoolColumn::from(bits));
    }

    #[test]
    fn set_then_read(
        states in proptest::collection::vec(present_state(), 1..80),
        raw in any::<usize>(),
        state in any_state(),
    ) {
        let mut column: BoolColumn = states.iter().copied().collect();
        let len = column.len();
        prop_assert_eq!(len, states.len());
        let position = raw % len;
        column.set(position, state).unwrap();

        let last_chunk = (len - 1) / SLOTS_PER_CHUNK;
        if state == BitBool::Null && position / SLOTS_PER_CHUNK == last_chunk {
            // A `Null` in the last chunk is indistinguishable from unused capacity.
            prop_assert_eq!(column.len(), position);
        } else {
            prop_assert_eq!(column.len(), len);
            prop_assert_eq!(column.get(position).unwrap(), state);
        }
    }

    #[test]
    fn subset_reads_through(
        states in proptest::collection::vec(present_state(), 0..80),
        raw in proptest::collection::vec(any::<usize>(), 0..80),
    ) {
        let column: BoolColumn = states.iter().copied().collect();
        let indices = fold_indices(&raw, column.len());
        let subset = column.subset(&indices).unwrap();
        prop_assert_eq!(subset.len(), indices.len());
        for (position, index) in indices.iter().enumerate() {
            prop_assert_eq!(subset.location(position).unwrap(), column.location(*index).unwrap());
        }
    }

    #[test]
    fn copies_are_independent(
        states in proptest::collection::vec(present_state(), 1..40),
        extra in proptest::collection::vec(any::<bool>(), 0..20),
    ) {
        let column: BoolColumn = states.iter().copied().collect();
        let before = column.to_string();
        let mut copy = column.copy();
        prop_assert_eq!(&copy, &column);
        copy.set(0, BitBool::NaN).unwrap();
        copy.extend(extra);
        prop_assert_eq!(column.to_string(), before);
    }

    #[test]
    fn bool_is_nan_matches_location(states in proptest::collection::vec(present_state(), 0..80)) {
        let column = Column::from(states.iter().copied().collect::<BoolColumn>());
        let flags = column.is_nan();
        prop_assert_eq!(flags.len(), column.len());
        for (position, flag) in flags.iter().enumerate() {
            prop_assert_eq!(*flag, column.location(position).unwrap().is_nan);
        }
    }

    #[test]
    fn int_is_nan_matches_location(values in proptest::collection::vec(int_value(), 0..80)) {
        let column = Column::from(IntColumn::from(values.clone()));
        let flags = column.is_nan();
        prop_assert_eq!(flags.len(), values.len());
        for (position, flag) in flags.iter().enumerate() {
            prop_assert_eq!(*flag, column.location(position).unwrap().is_nan);
            prop_assert_eq!(*flag, values[position] == NAN_INT);
        }
    }

    #[test]
    fn int_subset_reads_through(
        values in proptest::collection::vec(int_value(), 0..80),
        raw in proptest::collection::vec(any::<usize>(), 0..80),
    ) {
        let column = IntColumn::from(values);
        let indices = fold_indices(&raw, column.len());
        let subset = column.subset(&indices).unwrap();
        prop_assert_eq!(subset.len(), indices.len());
        for (position, index) in indices.iter().enumerate() {
            prop_assert_eq!(subset.location(position).unwrap(), column.location(*index).unwrap());
        }
    }

    #[test]
    fn swap_exchanges(
        states in proptest::collection::vec(present_state(), 1..80),
        i in any::<usize>(),
        j in any::<usize>(),
    ) {
        let mut column: BoolColumn = states.iter().copied().collect();
        let (i, j) = (i % states.len(), j % states.len());
        column.swap(i, j).unwrap();
        prop_assert_eq!(column.get(i).unwrap(), states[j]);
        prop_assert_eq!(column.get(j).unwrap(), states[i]);
        prop_assert_eq!(column.len(), states.len());
    }
}
