use shadow_rs::ShadowBuilder;

// Git and toolchain details for `sms-relay --version`.
fn main() {
    ShadowBuilder::builder()
        .build()
        .expect("shadow-rs could not collect build metadata");
}
