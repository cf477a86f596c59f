use hashmux::{AlgorithmId, Digest, Error, FactoryRegistry, RegistryConfig};
use proptest::prelude::*;

const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
const D3_SHA256: &str = "28969cdfa74a12c82f3bad960b0b000aca2ac329deea5c2328ebc6f2ba9802c1";

fn registry(arena_len: usize) -> FactoryRegistry {
    FactoryRegistry::new(RegistryConfig::default().with_arena_len(arena_len)).unwrap()
}

fn expected(id: AlgorithmId, data: &[u8]) -> Vec<u8> {
    fn run<D: cryptoxide::digest::Digest>(mut digest: D, data: &[u8]) -> Vec<u8> {
        digest.input(data);
        let mut out = vec![0u8; digest.output_bytes()];
        digest.result(&mut out);
        out
    }

    match id {
        AlgorithmId::Sha224 => run(cryptoxide::sha2::Sha224::new(), data),
        AlgorithmId::Sha256 => run(cryptoxide::sha2::Sha256::new(), data),
        AlgorithmId::Sha384 => run(cryptoxide::sha2::Sha384::new(), data),
        AlgorithmId::Sha512 => run(cryptoxide::sha2::Sha512::new(), data),
        #[cfg(feature = "sha512_256")]
        AlgorithmId::Sha512_256 => hashmux_primitives::Sha512_256::digest(data).to_vec(),
        #[cfg(not(feature = "sha512_256"))]
        AlgorithmId::Sha512_256 => unreachable!("sha512_256 is not compiled in"),
    }
}

#[cfg(feature = "sha256")]
#[test]
fn sha256_vectors_every_way() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();

    let registry = registry(1024);
    let sha256 = registry.sha256().unwrap();

    for (input, hex) in [(&[][..], EMPTY_SHA256), (&[0xd3][..], D3_SHA256)] {
        let mut h = sha256.create().unwrap();
        assert_eq!(h.digest(input, false).unwrap().to_string(), hex);

        let mut h = sha256.create().unwrap();
        assert_eq!(
            h.update(input, true).unwrap().finalize(true).unwrap().to_string(),
            hex
        );

        let mut h = sha256.create().unwrap();
        for byte in input {
            h.update(std::slice::from_ref(byte), false).unwrap();
        }
        assert_eq!(h.finalize(false).unwrap().to_string(), hex);
    }
}

#[test]
fn abc_across_algorithms() {
    let registry = registry(4096);

    for id in registry.algorithms().collect::<Vec<_>>() {
        let mut h = registry.constructor(id).unwrap().create().unwrap();
        assert_eq!(h.digest(b"abc", false).unwrap(), expected(id, b"abc")[..], "{id}");
        assert_eq!(h.digest_size(), expected(id, b"").len());
    }
}

#[cfg(feature = "sha384")]
#[test]
fn digest_twice_in_a_row() {
    let registry = registry(1024);
    let mut h = registry.sha384().unwrap().create().unwrap();

    let first = h.digest(b"same input", true).unwrap();
    let second = h.digest(b"same input", true).unwrap();
    assert_eq!(first, second);
    assert!(!h.is_streaming());
}

#[cfg(feature = "sha224")]
#[test]
fn digest_after_update_is_rejected() {
    let registry = registry(1024);
    let mut h = registry.sha224().unwrap().create().unwrap();

    h.update(b"partial", false).unwrap();
    assert_eq!(h.digest(b"more", false).unwrap_err(), Error::InvalidState);

    // the failed call absorbed nothing
    assert_eq!(h.finalize(false).unwrap(), expected(AlgorithmId::Sha224, b"partial")[..]);
}

#[cfg(feature = "sha512_256")]
#[test]
fn reset_returns_to_fresh() {
    let registry = registry(1024);
    let mut h = registry.sha512_256().unwrap().create().unwrap();

    h.update(b"to be forgotten", false).unwrap();
    h.finalize(false).unwrap();
    h.reset().unwrap();

    let fresh = registry.sha512_256().unwrap().create().unwrap().digest(b"x", false).unwrap();
    assert_eq!(h.digest(b"x", false).unwrap(), fresh);
}

#[test]
fn interleaved_instances_share_one_arena() {
    let registry = registry(300);
    let data: Vec<u8> = (0..2000u32).map(|i| (i % 251) as u8).collect();

    let mut instances: Vec<_> = registry
        .algorithms()
        .collect::<Vec<_>>()
        .into_iter()
        .map(|id| registry.constructor(id).unwrap().create().unwrap())
        .collect();

    for chunk in data.chunks(97) {
        for h in instances.iter_mut() {
            h.update(chunk, false).unwrap();
        }
    }

    for h in instances.iter_mut() {
        let id = h.algorithm();
        assert_eq!(h.finalize(true).unwrap(), expected(id, &data)[..], "{id}");
    }
}

#[cfg(feature = "sha384")]
#[test]
fn disabled_algorithm_has_no_constructor() {
    let registry: FactoryRegistry =
        FactoryRegistry::new(RegistryConfig::default().without(AlgorithmId::Sha384)).unwrap();

    assert!(registry.sha384().is_none());
    assert!(registry.constructor(AlgorithmId::Sha384).is_none());
}

#[cfg(not(feature = "sha384"))]
#[test]
fn uncompiled_algorithm_is_never_offered() {
    let registry = registry(1024);
    assert!(registry.constructor(AlgorithmId::Sha384).is_none());
    assert!(registry.algorithms().all(|id| id != AlgorithmId::Sha384));

    let asked = RegistryConfig::default().with_algorithms([AlgorithmId::Sha384]);
    assert!(matches!(
        FactoryRegistry::<hashmux::Ephemeral>::new(asked),
        Err(Error::Construction(_))
    ));
}

fn partition() -> impl Strategy<Value = (Vec<u8>, Vec<usize>)> {
    proptest::collection::vec(any::<u8>(), 0..1500).prop_flat_map(|data| {
        let len = data.len();
        (
            Just(data),
            proptest::collection::vec(1usize..=len.max(1), 0..12),
        )
    })
}

fn absorb_in_parts(
    registry: &FactoryRegistry,
    id: AlgorithmId,
    data: &[u8],
    sizes: &[usize],
    scrub: bool,
) -> Digest {
    let mut h = registry.constructor(id).unwrap().create().unwrap();
    let mut rest = data;
    for size in sizes {
        let (part, tail) = rest.split_at((*size).min(rest.len()));
        if !part.is_empty() {
            h.update(part, scrub).unwrap();
        }
        rest = tail;
    }
    h.update(rest, scrub).unwrap();
    h.finalize(scrub).unwrap()
}

proptest! {
    #[test]
    fn chunking_is_invisible((data, sizes) in partition(), scrub in any::<bool>()) {
        // small enough that most inputs need several staged slices
        let small = registry(300);
        let large = registry(1 << 16);

        for id in small.algorithms().collect::<Vec<_>>() {
            let oracle = expected(id, &data);

            let streamed = absorb_in_parts(&small, id, &data, &sizes, scrub);
            prop_assert_eq!(streamed.as_ref(), &oracle[..]);

            let mut one_shot = large.constructor(id).unwrap().create().unwrap();
            let digest = one_shot.digest(&data, scrub).unwrap();
            prop_assert_eq!(digest.as_ref(), &oracle[..]);
        }
    }
}
