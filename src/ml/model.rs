// ============================================================
// Layer 5 — Twin Network Model
// ============================================================
// A Siamese classifier over two sentence vectors:
//
//        x1 ──▶ ┌───────────────┐ ──▶ e1 ─┐
//               │  TowerEncoder │          ├─▶ |e1 - e2| ──▶ similarity ──▶ sigmoid
//        x2 ──▶ └───────────────┘ ──▶ e2 ─┘                  (128 → 1)
//               (one module, one weight set)
//
// TowerEncoder: 300 → 256 → 256 → 256 → 128, ReLU after the first
// three layers, the last one linear.
//
// Both inputs go through the same TowerEncoder instance. Together
// with the element-wise absolute difference this makes
// forward(a, b) == forward(b, a) bit for bit.
//
// Reference: Burn Book §3 (Building Blocks)
//            Bromley et al. (1993) Siamese networks

use burn::{
    nn::{
        loss::BinaryCrossEntropyLossConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::{relu, sigmoid},
};

/// Bounds of `TwinNetwork::forward`; both are exactly representable in f32.
pub const PROB_MIN: f32 = f32::EPSILON;
pub const PROB_MAX: f32 = 1.0 - f32::EPSILON;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct TwinNetworkConfig {
    #[config(default = 300)]
    pub input_dim:  usize,
    #[config(default = 256)]
    pub hidden_dim: usize,
    #[config(default = 128)]
    pub embed_dim:  usize,
}

impl TwinNetworkConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> TwinNetwork<B> {
        let tower = TowerEncoder {
            hidden1: LinearConfig::new(self.input_dim,  self.hidden_dim).init(device),
            hidden2: LinearConfig::new(self.hidden_dim, self.hidden_dim).init(device),
            hidden3: LinearConfig::new(self.hidden_dim, self.hidden_dim).init(device),
            output:  LinearConfig::new(self.hidden_dim, self.embed_dim).init(device),
        };
        let similarity = LinearConfig::new(self.embed_dim, 1).init(device);
        TwinNetwork { tower, similarity }
    }
}

/// The shared encoder applied to each question vector.
#[derive(Module, Debug)]
pub struct TowerEncoder<B: Backend> {
    pub hidden1: Linear<B>,
    pub hidden2: Linear<B>,
    pub hidden3: Linear<B>,
    pub output:  Linear<B>,
}

impl<B: Backend> TowerEncoder<B> {
    /// x: [batch, input_dim] → [batch, embed_dim]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = relu(self.hidden1.forward(x));
        let x = relu(self.hidden2.forward(x));
        let x = relu(self.hidden3.forward(x));
        self.output.forward(x)
    }
}

#[derive(Module, Debug)]
pub struct TwinNetwork<B: Backend> {
    pub tower:      TowerEncoder<B>,
    pub similarity: Linear<B>,
}

impl<B: Backend> TwinNetwork<B> {
    /// Pre-sigmoid score, shape [batch, 1]
    pub fn forward_logits(&self, x1: Tensor<B, 2>, x2: Tensor<B, 2>) -> Tensor<B, 2> {
        let e1 = self.tower.forward(x1);
        let e2 = self.tower.forward(x2);
        self.similarity.forward((e1 - e2).abs())
    }

    /// Duplicate probability in (0, 1), shape [batch, 1]
    ///
    /// f32 sigmoid rounds to exactly 0.0 or 1.0 for large |logit|;
    /// the result is clamped to [PROB_MIN, PROB_MAX].
    pub fn forward(&self, x1: Tensor<B, 2>, x2: Tensor<B, 2>) -> Tensor<B, 2> {
        sigmoid(self.forward_logits(x1, x2)).clamp(PROB_MIN, PROB_MAX)
    }

    /// Mean binary cross-entropy against 0/1 labels.
    ///
    /// Computed from the logits, which is the same quantity as BCE on
    /// the sigmoid output without the log(0) blow-up.
    pub fn forward_loss(
        &self,
        x1:     Tensor<B, 2>,
        x2:     Tensor<B, 2>,
        labels: Tensor<B, 1, Int>,
    ) -> Tensor<B, 1> {
        let logits = self.forward_logits(x1, x2).flatten::<1>(0, 1);
        let bce = BinaryCrossEntropyLossConfig::new()
            .with_logits(true)
            .init(&logits.device());
        bce.forward(logits, labels)
    }
}
