//! End-to-end streaming pipeline: the chunk manager hands generation
//! requests to a worker thread over a channel, generated chunks flow back,
//! saved edits are replayed, and the result meshes.

use std::thread;
use std::time::Duration;

use crossbeam_channel::bounded;
use strata_diag::with_timeout;
use strata_mesh::mesh_chunk;
use strata_terrain::generate_chunk;
use strata_voxel::{
    BlockDelta, BlockId, ChunkData, ChunkManager, DeltaStore, GenerationRequest, MemoryStore,
    StreamConfig, apply_deltas, offset_of,
};

fn spawn_generation_worker(
    requests: crossbeam_channel::Receiver<GenerationRequest>,
    chunks: crossbeam_channel::Sender<ChunkData>,
) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("terrain-worker".into())
        .spawn(move || {
            for request in requests {
                let chunk = generate_chunk(&request.seed, request.cx, request.cz);
                if chunks.send(chunk).is_err() {
                    break;
                }
            }
        })
        .expect("spawn terrain worker")
}

#[test]
fn test_streamed_chunks_generate_load_and_mesh() {
    let mut manager = ChunkManager::new("pipeline", StreamConfig { radius: 1 });
    let (request_tx, request_rx) = bounded::<GenerationRequest>(16);
    let (chunk_tx, chunk_rx) = bounded::<ChunkData>(16);
    let worker = spawn_generation_worker(request_rx, chunk_tx);

    let update = manager.update_player_position(8.0, 8.0);
    assert_eq!(update.requests, 9);
    while let Some(request) = manager.next_request() {
        request_tx.send(request).expect("worker alive");
    }

    for _ in 0..9 {
        let chunk = chunk_rx
            .recv_timeout(Duration::from_secs(10))
            .expect("worker produces every requested chunk");
        let mesh = mesh_chunk(&chunk);
        assert!(mesh.quads > 0, "generated terrain is never empty");
        manager.on_chunk_generated(&chunk.key);
    }

    assert_eq!(manager.loaded_count(), 9);
    assert_eq!(manager.pending_count(), 0);

    drop(request_tx);
    worker.join().expect("worker exits cleanly");
}

#[test]
fn test_saved_edits_survive_regeneration() {
    let mut store = MemoryStore::new();
    let mut chunk = generate_chunk("edits", 2, -1);
    let key = chunk.key.clone();

    // Player places a wood block in the air above the terrain.
    let offset = offset_of(4, 100, 4).expect("in range") as u32;
    store.save_delta(
        &key,
        vec![BlockDelta {
            offset,
            id: BlockId::Wood,
        }],
    );
    let baseline_quads = mesh_chunk(&chunk).quads;

    // Chunk is unloaded and later regenerated from the seed alone.
    chunk = generate_chunk("edits", 2, -1);
    let deltas = store.load_delta(&key).expect("edits were saved");
    apply_deltas(&mut chunk, &deltas);

    assert_eq!(chunk.get(4, 100, 4), Ok(BlockId::Wood));
    let edited_quads = mesh_chunk(&chunk).quads;
    assert_eq!(
        edited_quads,
        baseline_quads + 6,
        "a floating block adds exactly six visible faces"
    );
}

#[test]
fn test_generation_fits_inside_a_worker_timeout() {
    let result = with_timeout(
        || generate_chunk("deadline", 0, 0),
        Duration::from_secs(10),
        Some("chunk generation overran its deadline"),
    );
    let chunk = result.expect("generation completes well under the deadline");
    assert_eq!(chunk.key.storage_key(), "deadline:0:0");
}
