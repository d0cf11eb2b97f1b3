//! XOR training example.
//!
//! XOR is not linearly separable, so learning it proves gradients flow
//! correctly through the hidden layer.

use grad_nn::{sum_squared_error, Adam, Mlp, Module};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let inputs = [
        [0.0, 0.0],
        [0.0, 1.0],
        [1.0, 0.0],
        [1.0, 1.0],
    ];
    let targets = [0.0, 1.0, 1.0, 0.0];

    let mut rng = StdRng::seed_from_u64(1337);
    let net = Mlp::new(&mut rng, 2, &[8, 1]);
    let mut opt = Adam::new(0.05);

    println!("Training XOR network...\n");

    for epoch in 0..500 {
        let preds: Vec<_> = inputs.iter().map(|x| net.forward_data(x).remove(0)).collect();
        let loss = sum_squared_error(&preds, &targets);

        net.zero_grad();
        loss.backward();
        opt.step(&net.parameters());

        if epoch % 100 == 0 || epoch == 499 {
            println!("Epoch {:4}: loss = {:.6}", epoch, loss.data());
        }
    }

    println!("\nTesting trained network:");
    println!("========================");

    let mut correct = 0;
    for (input, &target) in inputs.iter().zip(targets.iter()) {
        let output = net.forward_data(input)[0].data();
        let predicted = if output > 0.5 { 1.0 } else { 0.0 };
        if (predicted - target).abs() < 0.01 {
            correct += 1;
        }
        println!(
            "Input: [{:.0}, {:.0}] -> Output: {:.4} (target: {:.0})",
            input[0], input[1], output, target
        );
    }

    println!("\nAccuracy: {}/4", correct);
    if correct == 4 {
        println!("Successfully learned XOR!");
    }
}
