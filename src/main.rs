//! # Voxel Chunk Store Entry Point
//!
//! Runs the headless demo from the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- world.json
//! ```

fn main() {
    voxel_chunk_store::run();
}
