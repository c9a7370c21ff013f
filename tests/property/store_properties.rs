//! Property-based tests for the document store

use bytes::Bytes;
use concurrencypad::backend::rooms::{RoomStore, UpdateMode};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_append_mode_concatenates_in_order(
        updates in proptest::collection::vec(
            proptest::collection::vec(any::<u8>(), 1..64),
            1..10,
        ),
    ) {
        tokio_test::block_on(async {
            let store = RoomStore::new(UpdateMode::Append);
            let mut expected = Vec::new();
            for update in &updates {
                store.apply_update("room", update).await;
                expected.extend_from_slice(update);
            }
            prop_assert_eq!(store.snapshot("room").await.unwrap(), Bytes::from(expected.clone()));
            prop_assert_eq!(store.doc_size("room").await, expected.len());
            Ok(())
        })?;
    }

    #[test]
    fn test_replace_mode_keeps_only_last_update(
        updates in proptest::collection::vec(
            proptest::collection::vec(any::<u8>(), 1..64),
            1..10,
        ),
    ) {
        tokio_test::block_on(async {
            let store = RoomStore::new(UpdateMode::Replace);
            for update in &updates {
                store.apply_update("room", update).await;
            }
            let last = updates.last().unwrap().clone();
            prop_assert_eq!(store.snapshot("room").await.unwrap(), Bytes::from(last));
            Ok(())
        })?;
    }

    #[test]
    fn test_rooms_never_share_documents(
        a in proptest::collection::vec(any::<u8>(), 1..32),
        b in proptest::collection::vec(any::<u8>(), 1..32),
    ) {
        tokio_test::block_on(async {
            let store = RoomStore::new(UpdateMode::Append);
            store.apply_update("room-a", &a).await;
            store.apply_update("room-b", &b).await;
            prop_assert_eq!(store.doc_size("room-a").await, a.len());
            prop_assert_eq!(store.doc_size("room-b").await, b.len());
            Ok(())
        })?;
    }
}
