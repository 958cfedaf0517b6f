//! Feed-forward regression network trained per request
//!
//! Architecture: input(9) -> dense(16, ReLU) -> dropout(0.2) ->
//! dense(8, ReLU) -> dense(1). Mean squared error loss, Adam updates,
//! fixed epoch budget. Training data is z-scored with statistics that ship
//! alongside the fitted weights so inference sees the same scale.

use ndarray::{Array1, Array2, Axis, Dimension};
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PredictionError;
use crate::features::{NormalizationStats, TrainingSet, FEATURE_COUNT};

/// Units in the first hidden layer
pub const HIDDEN1_UNITS: usize = 16;
/// Units in the second hidden layer
pub const HIDDEN2_UNITS: usize = 8;

const ADAM_BETA1: f64 = 0.9;
const ADAM_BETA2: f64 = 0.999;
const ADAM_EPSILON: f64 = 1e-8;

/// Hyperparameters for one training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    /// Fraction of rows (taken from the end, unshuffled) held out for
    /// validation loss monitoring
    pub validation_split: f64,
    pub dropout: f64,
    /// Fixed RNG seed for reproducible runs; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 100,
            batch_size: 32,
            learning_rate: 1e-3,
            validation_split: 0.2,
            dropout: 0.2,
            seed: None,
        }
    }
}

/// One fully connected layer computing `y = xW + b`
#[derive(Debug, Clone)]
struct DenseLayer {
    weights: Array2<f64>,
    bias: Array1<f64>,
}

impl DenseLayer {
    /// Glorot uniform initialization, zero bias.
    fn glorot(inputs: usize, outputs: usize, rng: &mut StdRng) -> Self {
        let limit = (6.0 / (inputs + outputs) as f64).sqrt();
        let dist = Uniform::new(-limit, limit);
        Self {
            weights: Array2::from_shape_fn((inputs, outputs), |_| rng.sample(dist)),
            bias: Array1::zeros(outputs),
        }
    }

    fn forward(&self, input: &Array2<f64>) -> Array2<f64> {
        input.dot(&self.weights) + &self.bias
    }
}

fn relu(x: &Array2<f64>) -> Array2<f64> {
    x.mapv(|v| v.max(0.0))
}

fn relu_mask(pre_activation: &Array2<f64>) -> Array2<f64> {
    pre_activation.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 })
}

/// Fitted network weights
#[derive(Debug, Clone)]
pub struct Network {
    hidden1: DenseLayer,
    hidden2: DenseLayer,
    output: DenseLayer,
}

/// Parameter gradients for one mini-batch
struct Gradients {
    w1: Array2<f64>,
    b1: Array1<f64>,
    w2: Array2<f64>,
    b2: Array1<f64>,
    w3: Array2<f64>,
    b3: Array1<f64>,
}

impl Network {
    fn new(rng: &mut StdRng) -> Self {
        Self {
            hidden1: DenseLayer::glorot(FEATURE_COUNT, HIDDEN1_UNITS, rng),
            hidden2: DenseLayer::glorot(HIDDEN1_UNITS, HIDDEN2_UNITS, rng),
            output: DenseLayer::glorot(HIDDEN2_UNITS, 1, rng),
        }
    }

    /// Forward pass without dropout for a single normalized feature row.
    #[must_use]
    pub fn predict(&self, input: &Array1<f64>) -> f64 {
        let x = input.clone().insert_axis(Axis(0));
        self.predict_batch(&x)[0]
    }

    /// Forward pass without dropout for a batch of normalized rows.
    #[must_use]
    pub fn predict_batch(&self, inputs: &Array2<f64>) -> Array1<f64> {
        let a1 = relu(&self.hidden1.forward(inputs));
        let a2 = relu(&self.hidden2.forward(&a1));
        let out = self.output.forward(&a2);
        out.index_axis(Axis(1), 0).to_owned()
    }

    /// Forward and backward pass over one mini-batch with inverted dropout
    /// after the first hidden layer. Returns parameter gradients.
    fn backward(
        &self,
        inputs: &Array2<f64>,
        targets: &Array1<f64>,
        dropout: f64,
        rng: &mut StdRng,
    ) -> Gradients {
        let batch = inputs.nrows() as f64;

        let z1 = self.hidden1.forward(inputs);
        let mut a1 = relu(&z1);
        let keep = 1.0 - dropout;
        let mask = if dropout > 0.0 {
            Array2::from_shape_fn(a1.raw_dim(), |_| {
                if rng.r#gen::<f64>() < keep {
                    1.0 / keep
                } else {
                    0.0
                }
            })
        } else {
            Array2::ones(a1.raw_dim())
        };
        a1 = a1 * &mask;

        let z2 = self.hidden2.forward(&a1);
        let a2 = relu(&z2);
        let out = self.output.forward(&a2);

        // dL/dout for MSE, shape [batch, 1]
        let pred = out.index_axis(Axis(1), 0).to_owned();
        let dout = ((pred - targets) * (2.0 / batch)).insert_axis(Axis(1));

        let w3 = a2.t().dot(&dout);
        let b3 = dout.sum_axis(Axis(0));
        let da2 = dout.dot(&self.output.weights.t());
        let dz2 = da2 * relu_mask(&z2);

        let w2 = a1.t().dot(&dz2);
        let b2 = dz2.sum_axis(Axis(0));
        let da1 = dz2.dot(&self.hidden2.weights.t()) * &mask;
        let dz1 = da1 * relu_mask(&z1);

        let w1 = inputs.t().dot(&dz1);
        let b1 = dz1.sum_axis(Axis(0));

        Gradients {
            w1,
            b1,
            w2,
            b2,
            w3,
            b3,
        }
    }
}

/// First and second moment estimates for one parameter tensor
#[derive(Debug, Clone)]
struct AdamState<D: Dimension> {
    m: ndarray::Array<f64, D>,
    v: ndarray::Array<f64, D>,
}

impl<D: Dimension> AdamState<D> {
    fn zeros_like(param: &ndarray::Array<f64, D>) -> Self {
        Self {
            m: ndarray::Array::zeros(param.raw_dim()),
            v: ndarray::Array::zeros(param.raw_dim()),
        }
    }

    fn update(
        &mut self,
        param: &mut ndarray::Array<f64, D>,
        grad: &ndarray::Array<f64, D>,
        learning_rate: f64,
        step: i32,
    ) {
        self.m = &self.m * ADAM_BETA1 + grad * (1.0 - ADAM_BETA1);
        self.v = &self.v * ADAM_BETA2 + &grad.mapv(|g| g * g) * (1.0 - ADAM_BETA2);

        let m_hat = &self.m / (1.0 - ADAM_BETA1.powi(step));
        let v_hat = &self.v / (1.0 - ADAM_BETA2.powi(step));
        let delta = m_hat / (v_hat.mapv(f64::sqrt) + ADAM_EPSILON) * learning_rate;
        *param = &*param - &delta;
    }
}

/// Adam optimizer over every network parameter
struct AdamOptimizer {
    step: i32,
    w1: AdamState<ndarray::Ix2>,
    b1: AdamState<ndarray::Ix1>,
    w2: AdamState<ndarray::Ix2>,
    b2: AdamState<ndarray::Ix1>,
    w3: AdamState<ndarray::Ix2>,
    b3: AdamState<ndarray::Ix1>,
}

impl AdamOptimizer {
    fn new(network: &Network) -> Self {
        Self {
            step: 0,
            w1: AdamState::zeros_like(&network.hidden1.weights),
            b1: AdamState::zeros_like(&network.hidden1.bias),
            w2: AdamState::zeros_like(&network.hidden2.weights),
            b2: AdamState::zeros_like(&network.hidden2.bias),
            w3: AdamState::zeros_like(&network.output.weights),
            b3: AdamState::zeros_like(&network.output.bias),
        }
    }

    fn apply(&mut self, network: &mut Network, grads: &Gradients, learning_rate: f64) {
        self.step += 1;
        let t = self.step;
        self.w1
            .update(&mut network.hidden1.weights, &grads.w1, learning_rate, t);
        self.b1
            .update(&mut network.hidden1.bias, &grads.b1, learning_rate, t);
        self.w2
            .update(&mut network.hidden2.weights, &grads.w2, learning_rate, t);
        self.b2
            .update(&mut network.hidden2.bias, &grads.b2, learning_rate, t);
        self.w3
            .update(&mut network.output.weights, &grads.w3, learning_rate, t);
        self.b3
            .update(&mut network.output.bias, &grads.b3, learning_rate, t);
    }
}

/// Fitted model with everything inference needs
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub network: Network,
    /// Root mean squared error over the full training set
    pub rmse: f64,
    pub stats: NormalizationStats,
}

fn mse(predictions: &Array1<f64>, targets: &Array1<f64>) -> f64 {
    let diff = predictions - targets;
    diff.mapv(|d| d * d).mean().unwrap_or(f64::NAN)
}

/// Train a fresh network on the given set.
///
/// The last `validation_split` fraction of rows is held out, unshuffled,
/// for loss monitoring only; the training portion is reshuffled each epoch.
/// The reported RMSE is computed over the entire set after training.
pub fn train(set: &TrainingSet, config: &TrainingConfig) -> Result<TrainedModel, PredictionError> {
    if set.is_empty() {
        return Err(PredictionError::InsufficientData {
            rows: 0,
            required: 1,
        });
    }

    let stats = NormalizationStats::fit(&set.features);
    let inputs = stats.normalize(&set.features);
    let targets = &set.targets;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut network = Network::new(&mut rng);
    let mut optimizer = AdamOptimizer::new(&network);

    let rows = inputs.nrows();
    let validation_len = ((rows as f64) * config.validation_split).floor() as usize;
    let train_len = rows - validation_len;
    let batch_size = config.batch_size.max(1);

    let mut order: Vec<usize> = (0..train_len).collect();
    for epoch in 0..config.epochs {
        order.shuffle(&mut rng);
        for batch in order.chunks(batch_size) {
            let batch_inputs = inputs.select(Axis(0), batch);
            let batch_targets: Array1<f64> = batch.iter().map(|&i| targets[i]).collect();
            let grads = network.backward(&batch_inputs, &batch_targets, config.dropout, &mut rng);
            optimizer.apply(&mut network, &grads, config.learning_rate);
        }

        if validation_len > 0 && (epoch + 1) % 20 == 0 {
            let validation_inputs = inputs.slice(ndarray::s![train_len.., ..]).to_owned();
            let validation_targets = targets.slice(ndarray::s![train_len..]).to_owned();
            let predictions = network.predict_batch(&validation_inputs);
            debug!(
                epoch = epoch + 1,
                validation_mse = mse(&predictions, &validation_targets),
                "training checkpoint"
            );
        }
    }

    let predictions = network.predict_batch(&inputs);
    let rmse = mse(&predictions, targets).sqrt();
    if !rmse.is_finite() {
        return Err(PredictionError::TrainingFailed(
            "non-finite training loss".to_string(),
        ));
    }

    Ok(TrainedModel {
        network,
        rmse,
        stats,
    })
}
