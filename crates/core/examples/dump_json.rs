fn main() {
    let l = rnacoords_core::layout("((..((...))..((...))..))").expect("layout");
    println!("=== BASES ===");
    for (i, b) in l.bases.iter().enumerate() {
        println!(
            "base[{}]: x={:.4} y={:.4} arc={:.4} loop={}",
            i, b.x, b.y, b.angle, b.loop_index
        );
    }
    println!("\n=== LOOPS ===");
    println!("{}", serde_json::to_string_pretty(&l.loops).unwrap());
}
