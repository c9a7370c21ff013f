//! Property-based tests for the wire protocol types

use concurrencypad::shared::protocol::{ClientMessage, ServerMessage, UserPresence};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_server_messages_carry_snake_case_tags(user_id in "[a-z0-9-]{1,16}") {
        let msg = ServerMessage::UserLeft { user_id: user_id.clone() };
        let json = serde_json::to_value(&msg).unwrap();
        prop_assert_eq!(&json["type"], "user_left");
        prop_assert_eq!(&json["user_id"], user_id.as_str());
    }

    #[test]
    fn test_join_defaults_are_stable(client_id in "[a-f0-9]{8,36}") {
        let user = UserPresence::from_join(&client_id, None, None, None);
        prop_assert_eq!(&user.id, &client_id);
        let short: String = client_id.chars().take(6).collect();
        prop_assert_eq!(user.name, format!("User-{short}"));
        prop_assert_eq!(user.color, "#3B82F6");
        prop_assert!(!user.simulated);
    }

    #[test]
    fn test_unknown_client_message_types_never_fail_parsing(
        tag in "zz[a-z_]{1,18}",
        value in 0i64..1000,
    ) {
        let raw = format!(r#"{{"type":"{tag}","extra":{value}}}"#);
        let parsed: Result<ClientMessage, _> = serde_json::from_str(&raw);
        // Every syntactically valid tagged object parses; unknown tags
        // collapse into the ignore arm
        prop_assert!(parsed.is_ok());
    }
}
