use std::sync::{
    mpsc::{self, Receiver, TryRecvError},
    Arc, PoisonError, RwLock,
};

use threadpool::ThreadPool;

use crate::{color::Rgba, error::Error, image::Image, logger};

mod aggregation;
pub mod grid;
pub mod observer;
mod options;
mod sorting;

pub use grid::ColorSample;
pub use observer::{ColorFound, SubscriptionId, COLOR_FOUND_NOTIFICATION};
pub use options::{
    get_number_of_threads, Aggregation, SampleSize, SamplerOptions, SortKey, SortOrder,
    DEFAULT_QUANTIZATION_BITS, DEFAULT_SAMPLE_SIZE,
};

use grid::SampleGrid;
use observer::Observers;

/// Dominant color of `image` sampled on the grid in `options`.
pub fn dominant_color(image: &Image, options: &SamplerOptions) -> crate::Result<Rgba> {
    let grid = SampleGrid::new(image, options.sample_size)?;
    let samples: Vec<ColorSample> = grid.samples().collect();
    logger::log_samples(&samples);
    aggregation::aggregate(&samples, options.aggregation, options.quantization_bits)
}

/// Copy of `image` with its pixels reordered by `options.sort_key`.
pub fn sorted_image(image: &Image, options: &SamplerOptions) -> crate::Result<Image> {
    sorting::sort_image(
        image,
        options.sample_size,
        options.sort_key,
        options.sort_order,
    )
}

/// Receives the single result of a call dispatched onto the sampler's pool.
pub struct CompletionHandle<T> {
    receiver: Receiver<crate::Result<T>>,
}

impl<T> CompletionHandle<T> {
    /// Blocks until the result arrives.
    pub fn wait(self) -> crate::Result<T> {
        self.receiver.recv().map_err(|_| Error::WorkerTerminated)?
    }

    /// Returns the result if it already arrived, the handle otherwise.
    pub fn try_wait(self) -> std::result::Result<crate::Result<T>, Self> {
        match self.receiver.try_recv() {
            Ok(result) => Ok(result),
            Err(TryRecvError::Empty) => Err(self),
            Err(TryRecvError::Disconnected) => Ok(Err(Error::WorkerTerminated)),
        }
    }
}

fn completion_channel<T: Send + 'static>(
) -> (impl FnOnce(crate::Result<T>) + Send + 'static, CompletionHandle<T>) {
    let (sender, receiver) = mpsc::channel();
    let completion = move |result: crate::Result<T>| {
        if sender.send(result).is_err() {
            log::debug!("Completion handle dropped before the result arrived");
        }
    };
    (completion, CompletionHandle { receiver })
}

/// Long lived sampler that runs every call on its worker pool and hands the
/// result to a one shot completion.
///
/// Options are snapshotted when a call is issued, so changing them never
/// affects calls already in flight.
pub struct ColorSampler {
    threadpool: ThreadPool,
    options: RwLock<SamplerOptions>,
    observers: Arc<Observers>,
}

impl ColorSampler {
    pub fn new(options: SamplerOptions) -> Self {
        let threadpool = ThreadPool::with_name(
            "color-sampler".to_owned(),
            options.number_of_threads.max(1),
        );
        Self::with_threadpool(options, threadpool)
    }

    pub fn with_threadpool(options: SamplerOptions, threadpool: ThreadPool) -> Self {
        log::info!(
            "Color sampler with {} workers, sample size {}x{}, {:?} aggregation",
            threadpool.max_count(),
            options.sample_size.width,
            options.sample_size.height,
            options.aggregation
        );
        Self {
            threadpool,
            options: RwLock::new(options),
            observers: Arc::new(Observers::default()),
        }
    }

    pub fn options(&self) -> SamplerOptions {
        *self.options.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_options(&self, options: SamplerOptions) {
        *self.options.write().unwrap_or_else(PoisonError::into_inner) = options;
    }

    pub fn sample_size(&self) -> SampleSize {
        self.options().sample_size
    }

    pub fn set_sample_size(&self, sample_size: SampleSize) {
        self.options
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .sample_size = sample_size;
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&ColorFound) + Send + Sync + 'static,
    {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Computes the dominant color of `image` on a worker. `completion` runs
    /// exactly once on that worker, after which subscribers are notified of
    /// a found color.
    pub fn compute_primary_color<F>(&self, image: Arc<Image>, completion: F)
    where
        F: FnOnce(crate::Result<Rgba>) + Send + 'static,
    {
        let options = self.options();
        let observers = Arc::clone(&self.observers);
        self.threadpool.execute(move || {
            let result = dominant_color(&image, &options);
            let found = match &result {
                Ok(color) => {
                    log::info!(
                        "Dominant color {} found in {}x{} image",
                        color,
                        image.width(),
                        image.height()
                    );
                    Some(*color)
                }
                Err(error) => {
                    log::warn!("Sampling dominant color failed: {}", error);
                    None
                }
            };
            completion(result);
            if let Some(color) = found {
                observers.broadcast(color);
            }
        });
    }

    /// Sorts the pixels of `image` by color on a worker. `completion` runs
    /// exactly once on that worker.
    pub fn sort_by_color<F>(&self, image: Arc<Image>, completion: F)
    where
        F: FnOnce(crate::Result<Image>) + Send + 'static,
    {
        let options = self.options();
        self.threadpool.execute(move || {
            let result = sorted_image(&image, &options);
            if let Err(error) = &result {
                log::warn!("Sorting image by color failed: {}", error);
            }
            completion(result);
        });
    }

    pub fn primary_color(&self, image: Arc<Image>) -> CompletionHandle<Rgba> {
        let (completion, handle) = completion_channel();
        self.compute_primary_color(image, completion);
        handle
    }

    pub fn sorted_image(&self, image: Arc<Image>) -> CompletionHandle<Image> {
        let (completion, handle) = completion_channel();
        self.sort_by_color(image, completion);
        handle
    }

    /// Blocks until every call issued so far has completed.
    pub fn join(&self) {
        self.threadpool.join();
    }
}

impl Default for ColorSampler {
    fn default() -> Self {
        Self::new(SamplerOptions::default())
    }
}
