// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::str::FromStr;

#[test]
fn define_id_new_and_as_str() {
    let id = ProviderTag::new("google");
    assert_eq!(id.as_str(), "google");
}

#[test]
fn define_id_display() {
    let id = ProviderTag::new("microsoft");
    assert_eq!(id.to_string(), "microsoft");
}

#[test]
fn define_id_from_str_and_string() {
    let a: ProviderTag = "google".into();
    let b: ProviderTag = String::from("google").into();
    assert_eq!(a, b);
}

#[test]
fn define_id_partial_eq_str() {
    let id = ProviderTag::new("google");
    assert_eq!(id, *"google");
    assert_eq!(id, "google");
}

#[test]
fn define_id_borrow_str() {
    let id = ProviderTag::new("google");
    let borrowed: &str = id.borrow();
    assert_eq!(borrowed, "google");
}

#[test]
fn define_id_hash_map_lookup() {
    let mut map = HashMap::new();
    map.insert(ProviderTag::new("google"), 1);
    assert_eq!(map.get("google"), Some(&1));
}

#[test]
fn define_id_serde_roundtrip() {
    let id = ProviderTag::new("microsoft");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"microsoft\"");
    let back: ProviderTag = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn canonical_id_display_and_parse_roundtrip() {
    let id = CanonicalId::new(uuid::Uuid::new_v4());
    let s = id.to_string();
    let parsed = CanonicalId::from_str(&s).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn canonical_id_serde_is_plain_string() {
    let id = CanonicalId::new(uuid::Uuid::nil());
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
}

#[test]
fn uuid_gen_creates_unique_ids() {
    let gen = UuidIdGen;
    assert_ne!(gen.next(), gen.next());
}

#[test]
fn sequential_gen_is_deterministic_and_shared() {
    let gen1 = SequentialIdGen::new();
    let gen2 = gen1.clone();
    let a = gen1.next();
    let b = gen2.next();
    assert_ne!(a, b);
    assert_eq!(gen1.next(), CanonicalId::new(uuid::Uuid::from_u128(3)));
}
