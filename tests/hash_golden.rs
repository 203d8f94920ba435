use hash_collisions::{
    fnv1a_hash,
    hash::{Digest, Fnv1a, Murmur3},
    murmur_hash, Hash32,
};
use test_log::test;

#[test]
fn hash_golden_he11o() {
    assert_eq!(0x3a2b_5d69, fnv1a_hash("He11o"));
    assert_eq!(0x3c8d_722c, murmur_hash("He11o"));

    assert_eq!(975_920_489, fnv1a_hash(b"He11o"));
    assert_eq!(1_015_902_764, murmur_hash(b"He11o".to_vec()));
}

#[test]
fn hash_empty_key() {
    assert_eq!(
        Digest::from_raw(0x811c_9dc5).into_i32(),
        fnv1a_hash("")
    );
    assert_eq!(2_128_831_035, fnv1a_hash(""));
    assert_eq!(0x4570_315f, murmur_hash(""));
}

#[test]
fn hash_deterministic() {
    for _ in 0..1_000 {
        let key = nanoid::nanoid!();

        assert_eq!(fnv1a_hash(&key), fnv1a_hash(key.clone()));
        assert_eq!(murmur_hash(&key), murmur_hash(key.clone()));
    }
}

#[test]
fn hash_non_negative() {
    for x in 0..100_000u32 {
        let key = x.to_string();
        assert!(fnv1a_hash(&key) >= 0, "negative FNV-1a digest for {key}");
        assert!(murmur_hash(&key) >= 0, "negative MurmurHash3 digest for {key}");
    }
}

#[test]
fn hash_min_value_is_only_negative_digest() {
    assert_eq!(i32::MIN, fnv1a_hash("#kQFkY"));
    assert!(Fnv1a.digest(b"#kQFkY").is_negative());
    assert_eq!(1 << 31, Fnv1a.digest(b"#kQFkY").magnitude());
}

#[test]
fn hash_functions_by_name() {
    assert_eq!("FNV-1a", Fnv1a.name());
    assert_eq!("MurmurHash3", Murmur3::default().name());
    assert_eq!(256, Murmur3::default().seed());
}
