// End-to-end behaviour of the scanner and the snapshot-backed search
use ref_finder_core::{
    search, CallbackEntry, Field, Handle, InspectableObject, NullTargetPolicy, ObjectKind,
    ReferenceScanner, ScanConfig, SearchScope, SnapshotStore, PROJECT_LOCATION,
};

fn object(id: u64, fields: Vec<Field>) -> InspectableObject {
    InspectableObject {
        handle: Handle::new(id),
        name: format!("obj{}", id),
        kind: ObjectKind::GameObject,
        fields,
    }
}

#[test]
fn callback_scenario_matches() {
    let x = Handle::new(1);
    let candidate = object(
        10,
        vec![
            Field::reference("m_Ref", None),
            Field::callbacks("onClick", vec![CallbackEntry::to(Some(x))]),
        ],
    );
    assert!(ReferenceScanner::new().has_reference(&candidate, Some(x)));
}

#[test]
fn different_object_does_not_match() {
    let candidate = object(10, vec![Field::reference("m_Ref", Some(Handle::new(2)))]);
    assert!(!ReferenceScanner::new().has_reference(&candidate, Some(Handle::new(1))));
}

#[test]
fn structurally_equal_objects_are_distinct() {
    // Two objects with identical contents but different identities
    let original = object(1, vec![Field::opaque("m_Speed")]);
    let twin = object(2, vec![Field::opaque("m_Speed")]);
    assert_eq!(original.fields, twin.fields);

    let candidate = object(10, vec![Field::reference("m_Ref", Some(twin.handle))]);
    let scanner = ReferenceScanner::new();
    assert!(!scanner.has_reference(&candidate, Some(original.handle)));
    assert!(scanner.has_reference(&candidate, Some(twin.handle)));
}

#[test]
fn repeated_scans_agree() {
    let x = Handle::new(1);
    let candidate = object(10, vec![Field::callbacks("onClick", vec![CallbackEntry::to(Some(x))])]);
    let scanner = ReferenceScanner::new();

    let first = scanner.has_reference(&candidate, Some(x));
    let second = scanner.has_reference(&candidate, Some(x));
    assert_eq!(first, second);
    assert!(scanner.has_reference(&candidate, Some(x)));
    assert!(!scanner.has_reference(&candidate, Some(Handle::new(2))));
}

#[test]
fn batch_scenario_groups_by_key() {
    let t = Handle::new(99);
    let obj1 = object(1, vec![Field::reference("m_Ref", None)]);
    let obj2 = object(2, vec![Field::reference("m_Ref", Some(t))]);
    let obj3 = object(3, vec![Field::opaque("m_Name")]);

    let groups = ReferenceScanner::new()
        .find_all_references(vec![("A", obj1), ("A", obj2), ("B", obj3)], Some(t));

    assert_eq!(groups.len(), 2);
    let a: Vec<Handle> = groups["A"].iter().map(|o| o.handle).collect();
    assert_eq!(a, vec![Handle::new(2)]);
    assert!(groups["B"].is_empty());
}

#[test]
fn batch_preserves_input_order() {
    let t = Handle::new(99);
    let hits: Vec<(&str, InspectableObject)> = [5, 3, 8]
        .into_iter()
        .map(|id| ("Scene", object(id, vec![Field::reference("m_Ref", Some(t))])))
        .collect();

    let groups = ReferenceScanner::new().find_all_references(hits, Some(t));
    let ids: Vec<u64> = groups["Scene"].iter().map(|o| o.handle.id()).collect();
    assert_eq!(ids, vec![5, 3, 8]);
}

const PROJECT: &str = r#"{
    "scenes": [
        {
            "name": "Level1",
            "objects": [
                { "id": 1, "name": "Door", "kind": "game_object" },
                {
                    "id": 2,
                    "name": "Switch",
                    "kind": "game_object",
                    "properties": [
                        {
                            "name": "onToggle",
                            "type": "event",
                            "children": [ { "name": "calls", "type": "generic", "children": [
                                { "name": "0", "type": "generic", "children": [
                                    { "name": "target", "type": "object_reference", "reference": 1 }
                                ] }
                            ] } ]
                        }
                    ]
                },
                {
                    "id": 3,
                    "name": "Ghost",
                    "kind": "game_object",
                    "properties": [ { "name": "m_Count", "type": "integer", "reference": 1 } ]
                }
            ]
        },
        { "name": "Level2", "objects": [] }
    ],
    "assets": [
        {
            "id": 20,
            "name": "DoorPrefab",
            "kind": "prefab",
            "properties": [ { "name": "m_Template", "type": "object_reference", "reference": 1 } ]
        },
        {
            "id": 21,
            "name": "LevelData",
            "kind": "scriptable_object",
            "properties": [ { "name": "m_Entrance", "type": "object_reference", "reference": 1 } ]
        },
        {
            "id": 22,
            "name": "Palette",
            "kind": "scriptable_object",
            "properties": [ { "name": "m_Empty", "type": "object_reference" } ]
        }
    ]
}"#;

#[test]
fn snapshot_search_infers_game_object_scope() {
    let store = SnapshotStore::from_json(PROJECT).unwrap();
    let outcome = search(&store, Some(Handle::new(1)), &ScanConfig::new()).unwrap();

    assert_eq!(outcome.scope, SearchScope::GameObject);
    assert_eq!(outcome.target.as_ref().unwrap().name, "Door");
    // The malformed Ghost object is skipped, not fatal
    assert_eq!(outcome.skipped, 1);

    let keys: Vec<&str> = outcome.locations.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Level1", "Level2", PROJECT_LOCATION]);

    let level1 = &outcome.locations["Level1"];
    assert_eq!(level1.len(), 1);
    assert_eq!(level1[0].object.name, "Switch");
    assert_eq!(level1[0].path.to_string(), "onToggle.calls[0].target");

    assert!(outcome.locations["Level2"].is_empty());

    // LevelData is a scriptable object and out of scope
    let project: Vec<&str> = outcome.locations[PROJECT_LOCATION]
        .iter()
        .map(|m| m.object.name.as_str())
        .collect();
    assert_eq!(project, vec!["DoorPrefab"]);
}

#[test]
fn snapshot_search_any_scope() {
    let store = SnapshotStore::from_json(PROJECT).unwrap();
    let config = ScanConfig::new().with_scope(SearchScope::Any);
    let outcome = search(&store, Some(Handle::new(1)), &config).unwrap();

    assert_eq!(outcome.total_matches(), 3);
    assert_eq!(outcome.locations[PROJECT_LOCATION].len(), 2);
}

#[test]
fn snapshot_search_keeps_object_with_missing_reference() {
    let json = r#"{
        "scenes": [ { "name": "Main", "objects": [
            { "id": 1, "name": "Door", "kind": "game_object" },
            { "id": 2, "name": "Lever", "kind": "game_object", "properties": [
                { "name": "m_Lost", "type": "object_reference", "reference": 404 },
                { "name": "m_Door", "type": "object_reference", "reference": 1 }
            ] }
        ] } ]
    }"#;
    let store = SnapshotStore::from_json(json).unwrap();
    let config = ScanConfig::new().with_scope(SearchScope::Any);
    let outcome = search(&store, Some(Handle::new(1)), &config).unwrap();

    assert_eq!(outcome.skipped, 0);
    assert_eq!(outcome.total_matches(), 1);
    let hit = &outcome.locations["Main"][0];
    assert_eq!(hit.object.name, "Lever");
    assert_eq!(hit.path.to_string(), "m_Door");
}

#[test]
fn snapshot_search_null_target_policy() {
    let store = SnapshotStore::from_json(PROJECT).unwrap();

    let strict = search(&store, None, &ScanConfig::new()).unwrap();
    assert_eq!(strict.total_matches(), 0);

    let lenient_config = ScanConfig::new()
        .with_scope(SearchScope::ScriptableObject)
        .with_null_target_policy(NullTargetPolicy::MatchEmptySlots);
    let lenient = search(&store, None, &lenient_config).unwrap();
    let names: Vec<&str> = lenient.locations[PROJECT_LOCATION]
        .iter()
        .map(|m| m.object.name.as_str())
        .collect();
    assert_eq!(names, vec!["Palette"]);
}
