//! Round-trip law for every compiled backend

use bytes::Bytes;
use precompress_compression::{
    BackendResolver, BrotliMode, BrotliOptions, CompressionBackend,
};
use proptest::prelude::*;
use std::sync::Arc;

fn backends() -> Vec<Arc<dyn CompressionBackend>> {
    precompress_compression::builtin_candidates()
        .into_iter()
        .map(|c| {
            BackendResolver::with_candidates(vec![c])
                .resolve()
                .expect("candidate resolves")
        })
        .collect()
}

fn round_trip(backend: &dyn CompressionBackend, data: Vec<u8>, options: BrotliOptions) -> Vec<u8> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    rt.block_on(async {
        let compressed = backend.compress(Bytes::from(data), &options).await.unwrap();
        backend.decompress(compressed, &options).await.unwrap().to_vec()
    })
}

fn mode() -> impl Strategy<Value = BrotliMode> {
    prop_oneof![
        Just(BrotliMode::Generic),
        Just(BrotliMode::Text),
        Just(BrotliMode::Font),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn decompress_inverts_compress(
        data in proptest::collection::vec(any::<u8>(), 0..4096),
        quality in 0u32..=11,
        lgwin in 10u32..=24,
        mode in mode(),
    ) {
        let options = BrotliOptions { quality, lgwin, mode };
        for backend in backends() {
            let restored = round_trip(backend.as_ref(), data.clone(), options);
            prop_assert_eq!(&restored, &data, "backend {}", backend.kind());
        }
    }
}

#[test]
fn empty_buffer_round_trips() {
    for backend in backends() {
        let restored = round_trip(backend.as_ref(), Vec::new(), BrotliOptions::default());
        assert!(restored.is_empty(), "backend {}", backend.kind());
    }
}
