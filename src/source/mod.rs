use crate::domain::signal::PaymentSignal;
use futures::stream::BoxStream;

pub mod synthetic;

pub trait SignalSource: Send + Sync {
    fn stream(&self, count: usize) -> BoxStream<'static, PaymentSignal>;
}
