use std::collections::HashMap;

use ndarray::{Array1, Array2, array};
use ordpat::{
    Algorithm, GlobalValue, LocalValues, Ordpat, PermutationEntropy, pattern_uint64_width,
    pattern_word_size,
};

fn main() {
    // A short series and its order-3 patterns
    let x = array![3.0, 1.0, 2.0, 5.0, 4.0, 6.0];
    let codes = ordpat::ordpat(&x, 3, 1).unwrap();
    println!("Series: {x}");
    println!("Order-3 codes: {codes}");

    // Every algorithm agrees
    for algorithm in [
        Algorithm::Plain,
        Algorithm::Overlap,
        Algorithm::Lookup,
        Algorithm::Vectorised,
    ] {
        let codes = ordpat::encode_series(&x, 3, 1, Some(algorithm)).unwrap();
        println!("  {algorithm:<10} {codes}");
    }

    // Two series in the rows of a matrix, encoded along the last axis
    let signal: Array1<f64> = (0..200).map(|t| (t as f64 * 0.3).sin()).collect();
    let noise: Array1<f64> = (0..200)
        .map(|t| ((t * 7919 % 211) as f64 / 211.0) - 0.5)
        .collect();
    let mut data = Array2::zeros((2, 200));
    data.row_mut(0).assign(&signal);
    data.row_mut(1).assign(&noise);

    let encoder = Ordpat::new();
    let codes = encoder.encode(&data, 4, 1).unwrap();
    println!("Encoded shape: {:?}", codes.shape());

    for (name, row) in [("sine", &signal), ("noise", &noise)] {
        let pe = PermutationEntropy::new(row.clone(), 4, 1).unwrap();
        let mut counts: HashMap<u64, usize> = HashMap::new();
        for &c in pe.codes() {
            *counts.entry(c).or_insert(0) += 1;
        }
        println!(
            "{name}: {} distinct patterns, H = {:.4}, normalized = {:.4}, mean local = {:.4}",
            counts.len(),
            pe.global_value(),
            pe.normalized(),
            pe.global_from_local()
        );
    }

    // Storage requirements
    for order in [5, 10, 20, 21, 100, 255] {
        let words = pattern_uint64_width(order).unwrap();
        match pattern_word_size(order) {
            Ok(bits) => println!("order {order:>3}: {bits}-bit word, {words} u64 word(s)"),
            Err(_) => println!("order {order:>3}: {words} u64 words"),
        }
    }
}
