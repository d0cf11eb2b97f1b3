//! CLI demo for the scalar autodiff stack.
//!
//! Part 1 builds an expression, computes gradients, and validates them
//! against finite differences. Part 2 runs the reference MLP training loop.

use grad_core::{finite_diff_grad, leaf, Value};
use grad_nn::{sum_squared_error, Mlp, Module, SGD};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    env_logger::init();

    expression_demo();
    training_demo();
}

fn expression_demo() {
    println!("=== Reverse-Mode Autodiff Demo ===\n");

    // z = relu(x*y + x^2) / (y + 2)
    let x_val = 1.5;
    let y_val = 2.5;

    let build = |vals: &[f64]| {
        let x = leaf(vals[0]);
        let y = leaf(vals[1]);
        let num = (&x * &y + &x * &x).relu();
        let den = &y + 2.0;
        let z = &num / &den;
        (x, y, z)
    };

    let (x, y, z) = build(&[x_val, y_val]);

    println!("Expression: z = relu(x*y + x^2) / (y + 2)");
    println!("At point:   x = {}, y = {}", x_val, y_val);
    println!("Value:      z = {:.10}\n", z.data());

    z.backward();
    println!("Autodiff gradients:");
    println!("  dz/dx = {:.10}", x.grad());
    println!("  dz/dy = {:.10}\n", y.grad());

    let fd = finite_diff_grad(|vals| build(vals).2.data(), &[x_val, y_val], 1e-7);
    println!("Finite difference gradients (eps=1e-7):");
    println!("  dz/dx = {:.10}", fd[0]);
    println!("  dz/dy = {:.10}\n", fd[1]);

    let max_err = (x.grad() - fd[0]).abs().max((y.grad() - fd[1]).abs());
    let tolerance = 1e-5;
    if max_err < tolerance {
        println!("PASS: max error ({:.2e}) < tolerance ({:.2e})\n", max_err, tolerance);
    } else {
        println!("FAIL: max error ({:.2e}) >= tolerance ({:.2e})\n", max_err, tolerance);
        std::process::exit(1);
    }

    // Fan-out: the same leaf consumed twice must sum its contributions.
    let a = leaf(3.0);
    let square = &a * &a;
    square.backward();
    println!("Fan-out check: d(a*a)/da at a=3 is {} (expected 6)", a.grad());
    println!("Node view: {}\n", a);
}

fn training_demo() {
    println!("=== Training Demo: MLP 3 -> [4, 4, 1] ===\n");

    let inputs = [
        [2.0, 3.0, -1.0],
        [3.0, -1.0, 0.5],
        [0.5, 1.0, 1.0],
        [1.0, 1.0, -1.0],
    ];
    let targets = [1.0, -1.0, -1.0, 1.0];

    let mut rng = StdRng::seed_from_u64(42);
    let net = Mlp::new(&mut rng, 3, &[4, 4, 1]);
    let mut opt = SGD::new(0.0);

    let steps = 100;
    for k in 0..steps {
        let preds: Vec<Value> = inputs.iter().map(|x| net.forward_data(x).remove(0)).collect();
        let loss = sum_squared_error(&preds, &targets);

        // The ritual: zero, backward, step. Skipping zero_grad would
        // silently accumulate gradients across steps.
        net.zero_grad();
        loss.backward();

        let lr = 0.05 * (1.0 - 0.9 * k as f64 / steps as f64);
        opt.set_lr(lr);
        opt.step(&net.parameters());

        if k % 10 == 0 || k == steps - 1 {
            println!("step {:3}: loss = {:.6} (lr = {:.4})", k, loss.data(), lr);
        }
    }

    log::debug!("training finished after {} steps", steps);

    println!("\nFinal predictions vs targets:");
    for (input, &target) in inputs.iter().zip(targets.iter()) {
        let pred = net.forward_data(input)[0].data();
        println!("  {:?} -> {:+.4} (target {:+.0})", input, pred, target);
    }
}
