//! Synthetic crop dataset generation
//!
//! Seeded generator with a known yield formula, used to exercise the full
//! training pipeline and to seed demo environments. Yield responds to
//! rainfall, temperature, humidity, soil pH, and fertilizer through smooth
//! response factors plus Gaussian noise.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::dataset::TrainingData;
use super::pipeline::FeatureFrame;

const CROPS: [(&str, f64); 5] = [
    ("Wheat", 3.0),
    ("Rice", 4.0),
    ("Corn", 5.0),
    ("Soybean", 2.2),
    ("Sugarcane", 60.0),
];

/// Draw from a normal distribution via the Box-Muller transform
fn normal(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-10);
    let u2: f64 = rng.gen::<f64>();
    mean + std_dev * (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Generate a seeded synthetic training set of `n` rows
pub fn generate(n: usize, seed: u64) -> TrainingData {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut crops = Vec::with_capacity(n);
    let mut rainfall = Vec::with_capacity(n);
    let mut temperature = Vec::with_capacity(n);
    let mut humidity = Vec::with_capacity(n);
    let mut soil_ph = Vec::with_capacity(n);
    let mut fertilizer = Vec::with_capacity(n);
    let mut targets = Vec::with_capacity(n);

    for _ in 0..n {
        let (crop, crop_base) = CROPS[rng.gen_range(0..CROPS.len())];
        let r = normal(&mut rng, 600.0, 250.0).clamp(0.0, 3000.0);
        let t = normal(&mut rng, 25.0, 6.0).clamp(-5.0, 45.0);
        let h = normal(&mut rng, 65.0, 15.0).clamp(10.0, 100.0);
        let p = normal(&mut rng, 6.5, 0.8).clamp(3.5, 9.0);
        let f = normal(&mut rng, 150.0, 80.0).clamp(0.0, 800.0);

        let rain_factor = 1.0 - (-r / 400.0).exp();
        let temp_factor = (-(t - 25.0).powi(2) / 60.0).exp();
        let hum_factor = 1.0 - (h - 65.0).abs() / 120.0;
        let ph_factor = 1.0 - (p - 6.5).powi(2) / 9.0;
        let fert_factor = 1.0 - (-f / 120.0).exp();
        let noise = normal(&mut rng, 0.0, 0.15 * crop_base);

        let yield_val = crop_base
            * (0.5 + 0.8 * rain_factor * temp_factor * hum_factor * ph_factor * fert_factor)
            + noise;

        crops.push(crop.to_string());
        rainfall.push((r * 10.0).round() / 10.0);
        temperature.push((t * 100.0).round() / 100.0);
        humidity.push((h * 10.0).round() / 10.0);
        soil_ph.push((p * 100.0).round() / 100.0);
        fertilizer.push((f * 10.0).round() / 10.0);
        targets.push(yield_val.max(0.1));
    }

    let mut frame = FeatureFrame::new();
    // Columns all share length n, so these pushes cannot fail
    let _ = frame.push_categorical("crop_type", crops);
    let _ = frame.push_numeric("rainfall", rainfall);
    let _ = frame.push_numeric("temperature", temperature);
    let _ = frame.push_numeric("humidity", humidity);
    let _ = frame.push_numeric("soil_ph", soil_ph);
    let _ = frame.push_numeric("fertilizer_kg_per_ha", fertilizer);

    TrainingData { frame, targets }
}
