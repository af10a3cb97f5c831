fn main() {
    // Generates the `build` module used by `entrypoints::metadata`
    shadow_rs::ShadowBuilder::builder()
        .build()
        .expect("failed to generate build metadata");
}
