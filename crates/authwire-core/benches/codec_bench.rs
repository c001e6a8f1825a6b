//! Criterion benchmarks for the message codec.
//!
//! Measures encode/decode/JSON latency for representative messages, from
//! the two-field verify request up to a fully populated create request.
//!
//! Run with:
//! ```bash
//! cargo bench --package authwire-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use authwire_core::codec::{decode_message, encode_message, message_from_json, message_to_json};
use authwire_core::user::{
    AddHumanUserRequest, Gender, IdpInformation, IdpOauthAccessInformation, ListQuery,
    ListUsersRequest, Organization, SetHumanEmail, SetHumanProfile, SetMetadataEntry, UserState,
    VerifyEmailRequest,
};

// ── Message fixtures ──────────────────────────────────────────────────────────

fn make_verify_email() -> VerifyEmailRequest {
    VerifyEmailRequest {
        user_id: "217647145235".to_string(),
        verification_code: "123456".to_string(),
    }
}

fn make_list_users() -> ListUsersRequest {
    ListUsersRequest {
        query: Some(ListQuery {
            offset: 200,
            limit: 50,
            asc: true,
        }),
        states: vec![UserState::Active, UserState::Initial, UserState::Locked],
    }
}

fn make_add_human_user() -> AddHumanUserRequest {
    AddHumanUserRequest {
        user_id: None,
        username: Some("ada@example.com".to_string()),
        organization: Some(Organization {
            org_id: Some("217647099123".to_string()),
            org_domain: None,
        }),
        profile: Some(SetHumanProfile {
            given_name: "Ada".to_string(),
            family_name: "Lovelace".to_string(),
            nick_name: Some("ada".to_string()),
            display_name: Some("Ada Lovelace".to_string()),
            preferred_language: Some("en-GB".to_string()),
            gender: Some(Gender::Female),
        }),
        email: Some(SetHumanEmail {
            email: "ada@example.com".to_string(),
            is_verified: Some(true),
            ..Default::default()
        }),
        metadata: (0..8)
            .map(|index| SetMetadataEntry {
                key: format!("attribute-{index}"),
                value: vec![0xA5; 32],
            })
            .collect(),
        idp_links: Vec::new(),
    }
}

fn make_idp_information() -> IdpInformation {
    let raw = serde_json::json!({
        "sub": "ext-123",
        "email": "ada@example.com",
        "email_verified": true,
        "groups": ["eng", "admins", "oncall"],
        "profile": { "locale": "en-GB", "zoneinfo": "Europe/London" },
    });
    IdpInformation {
        oauth: Some(IdpOauthAccessInformation {
            access_token: "ya29.a0AfH6SMBx".repeat(4),
            id_token: Some("eyJhbGciOiJSUzI1NiJ9".repeat(8)),
        }),
        idp_id: "idp-7".to_string(),
        user_id: "ext-123".to_string(),
        user_name: "ada".to_string(),
        raw_information: match raw {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        },
        ldap: None,
        saml: None,
    }
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    group.bench_function(BenchmarkId::from_parameter("verify_email"), |b| {
        let message = make_verify_email();
        b.iter(|| encode_message(black_box(&message)));
    });
    group.bench_function(BenchmarkId::from_parameter("list_users"), |b| {
        let message = make_list_users();
        b.iter(|| encode_message(black_box(&message)));
    });
    group.bench_function(BenchmarkId::from_parameter("add_human_user"), |b| {
        let message = make_add_human_user();
        b.iter(|| encode_message(black_box(&message)));
    });
    group.bench_function(BenchmarkId::from_parameter("idp_information"), |b| {
        let message = make_idp_information();
        b.iter(|| encode_message(black_box(&message)));
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    group.bench_function(BenchmarkId::from_parameter("verify_email"), |b| {
        let bytes = encode_message(&make_verify_email());
        b.iter(|| decode_message::<VerifyEmailRequest>(black_box(&bytes)).unwrap());
    });
    group.bench_function(BenchmarkId::from_parameter("add_human_user"), |b| {
        let bytes = encode_message(&make_add_human_user());
        b.iter(|| decode_message::<AddHumanUserRequest>(black_box(&bytes)).unwrap());
    });
    group.bench_function(BenchmarkId::from_parameter("idp_information"), |b| {
        let bytes = encode_message(&make_idp_information());
        b.iter(|| decode_message::<IdpInformation>(black_box(&bytes)).unwrap());
    });

    group.finish();
}

fn bench_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("json");

    group.bench_function(BenchmarkId::from_parameter("to_json/add_human_user"), |b| {
        let message = make_add_human_user();
        b.iter(|| message_to_json(black_box(&message)).unwrap());
    });
    group.bench_function(
        BenchmarkId::from_parameter("from_json/add_human_user"),
        |b| {
            let json = message_to_json(&make_add_human_user()).unwrap();
            b.iter(|| message_from_json::<AddHumanUserRequest>(black_box(&json)).unwrap());
        },
    );

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_json);
criterion_main!(benches);
