//! Edit-intent taxonomy contract tests
//!
//! These tests pin the serialized shape of the intent stream. Hosts that
//! deliver intents over a message channel depend on these names staying
//! stable.

#[cfg(test)]
mod tests {
    use edit_types::{EditIntent, EditKind};

    #[test]
    fn test_committed_intent_shape() {
        let intent = EditIntent::committed_with(EditKind::InsertString, "h");
        let json = serde_json::to_string(&intent).unwrap();
        assert_eq!(json, r#"{"Committed":{"kind":"InsertString","data":"h"}}"#);
    }

    #[test]
    fn test_committed_without_data_skips_the_field() {
        let intent = EditIntent::committed(EditKind::InsertLineBreak);
        let json = serde_json::to_string(&intent).unwrap();
        assert_eq!(json, r#"{"Committed":{"kind":"InsertLineBreak"}}"#);
    }

    #[test]
    fn test_pre_edit_intent_shape() {
        let intent = EditIntent::pre_edit(EditKind::DeleteContentBackward, true);
        let json = serde_json::to_string(&intent).unwrap();
        assert_eq!(
            json,
            r#"{"PreEdit":{"kind":"DeleteContentBackward","has_range_selection":true}}"#
        );
    }

    #[test]
    fn test_composition_intent_shapes() {
        let json = serde_json::to_string(&EditIntent::composition_start()).unwrap();
        assert_eq!(json, r#""CompositionStart""#);

        let json = serde_json::to_string(&EditIntent::composition_end("漢字")).unwrap();
        assert_eq!(json, r#"{"CompositionEnd":{"text":"漢字"}}"#);
    }

    #[test]
    fn test_paste_intent_shape() {
        let json = serde_json::to_string(&EditIntent::paste("clip")).unwrap();
        assert_eq!(json, r#"{"Paste":{"text":"clip"}}"#);
    }

    #[test]
    fn test_out_of_taxonomy_kind_shape() {
        let json = serde_json::to_string(&EditKind::Other("formatBold".into())).unwrap();
        assert_eq!(json, r#"{"Other":"formatBold"}"#);
    }

    #[test]
    fn test_intents_round_trip() {
        let intents = [
            EditIntent::composition_start(),
            EditIntent::pre_edit(EditKind::DeleteWordForward, false),
            EditIntent::committed_with(EditKind::InsertFromDrop, "dropped"),
            EditIntent::paste("clip"),
            EditIntent::composition_end(""),
        ];

        for intent in &intents {
            let json = serde_json::to_string(intent).unwrap();
            let back: EditIntent = serde_json::from_str(&json).unwrap();
            assert_eq!(&back, intent, "round trip changed {}", intent);
        }
    }

    #[test]
    fn test_kind_names_are_stable() {
        // Display names follow the host-neutral inputType vocabulary.
        let expected = [
            (EditKind::InsertString, "insertString"),
            (EditKind::InsertWhiteSpace, "insertWhiteSpace"),
            (EditKind::InsertLineBreak, "insertLineBreak"),
            (EditKind::InsertFromPaste, "insertFromPaste"),
            (EditKind::InsertFromDrop, "insertFromDrop"),
            (EditKind::InsertCompositionText, "insertCompositionText"),
            (EditKind::DeleteContentBackward, "deleteContentBackward"),
            (EditKind::DeleteContentForward, "deleteContentForward"),
            (EditKind::DeleteWordBackward, "deleteWordBackward"),
            (EditKind::DeleteWordForward, "deleteWordForward"),
            (EditKind::DeleteByCut, "deleteByCut"),
            (EditKind::DeleteByDrag, "deleteByDrag"),
        ];

        for (kind, name) in expected {
            assert_eq!(kind.to_string(), name);
        }
    }
}
