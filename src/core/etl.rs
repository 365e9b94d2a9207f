use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::ResourceMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: ResourceMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: ResourceMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting automated cookie maintenance cycle...");
        self.monitor.log_phase("Start");

        // Extract
        let records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} cookie records", records.len());
        self.monitor.log_phase("Extract");

        // Transform
        let run = self.pipeline.transform(records).await?;
        tracing::info!(
            "Transformed {} cookies ({} changes, {} alerts)",
            run.snapshot.cookies.len(),
            run.changes.total_changes,
            run.alerts.len()
        );
        self.monitor.log_phase("Transform");

        // Load
        let output_path = self.pipeline.load(run).await?;
        tracing::info!("Results saved to: {}", output_path);
        self.monitor.log_phase("Load");
        self.monitor.log_summary();

        Ok(output_path)
    }
}
