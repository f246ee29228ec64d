//! Property-based tests for participant-set normalization
//!
//! The participant key is what the uniqueness index hangs off, so it must
//! be stable under reordering and duplication of the input list.

use proptest::prelude::*;
use uuid::Uuid;

use talkwire::shared::chat::conversation::participant_key;
use talkwire::shared::chat::message::validate_content;

fn uuid_strategy() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

proptest! {
    #[test]
    fn test_key_is_permutation_invariant(
        ids in proptest::collection::vec(uuid_strategy(), 2..6)
    ) {
        let mut reversed = ids.clone();
        reversed.reverse();

        prop_assert_eq!(participant_key(&ids), participant_key(&reversed));
    }

    #[test]
    fn test_key_ignores_duplicates(
        ids in proptest::collection::vec(uuid_strategy(), 2..6)
    ) {
        let mut doubled = ids.clone();
        doubled.extend_from_slice(&ids);

        prop_assert_eq!(participant_key(&ids), participant_key(&doubled));
    }

    #[test]
    fn test_distinct_pairs_get_distinct_keys(a in uuid_strategy(), b in uuid_strategy(), c in uuid_strategy()) {
        prop_assume!(b != c);

        prop_assert_ne!(participant_key(&[a, b]), participant_key(&[a, c]));
    }

    #[test]
    fn test_whitespace_only_content_is_rejected(
        padding in proptest::collection::vec(prop_oneof![Just(' '), Just('\t'), Just('\n')], 0..20)
    ) {
        let content: String = padding.into_iter().collect();

        prop_assert!(validate_content(&content).is_err());
    }

    #[test]
    fn test_content_with_any_visible_character_is_accepted(
        text in "[a-zA-Z0-9]{1,40}",
        leading in proptest::collection::vec(Just(' '), 0..5)
    ) {
        let padding: String = leading.into_iter().collect();
        let content = format!("{}{}", padding, text);

        prop_assert!(validate_content(&content).is_ok());
    }
}
