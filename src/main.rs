use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

use heartwatch_host_camera::{PromptCameraGate, StaticCameraGate};
use heartwatch_host_http::HttpMonitorClient;
use heartwatch_monitor::{
  CameraGate, ChannelNotifier, MeasurementResult, MonitorConfig, MonitoringWorkflow,
  WorkflowEvent, WorkflowState,
};

/// Heartwatch - client for the heart-rate monitoring service
#[derive(Parser)]
#[command(name = "heartwatch")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run one monitoring pass
  Run {
    /// Monitoring service endpoint
    #[arg(long, default_value = heartwatch_monitor::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Grant camera access without prompting
    #[arg(long)]
    grant: bool,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Run { endpoint, grant }) => {
      if grant {
        run_monitoring(endpoint, StaticCameraGate::granted()).await
      } else {
        run_monitoring(endpoint, PromptCameraGate::new()).await
      }
    }
    None => {
      println!("heartwatch - use --help to see available commands");
      Ok(())
    }
  }
}

/// Drive one monitoring run, printing status updates as they happen.
async fn run_monitoring<C>(endpoint: String, camera: C) -> Result<()>
where
  C: CameraGate + 'static,
{
  let (sender, mut receiver) = mpsc::unbounded_channel();
  let workflow = MonitoringWorkflow::with_notifier(
    MonitorConfig { endpoint },
    camera,
    HttpMonitorClient::new(),
    ChannelNotifier::new(sender),
  );

  // Status updates arrive while the run is still in flight.
  let printer = tokio::spawn(async move {
    while let Some(event) = receiver.recv().await {
      if let WorkflowEvent::StatusChanged { status, .. } = event {
        eprintln!("Status: {}", status);
      }
    }
  });

  workflow.start().await?;
  let snapshot = workflow.snapshot();

  // Dropping the workflow closes the event channel and ends the printer.
  drop(workflow);
  let _ = printer.await;

  match snapshot.state {
    WorkflowState::Succeeded => {
      if let Some(result) = snapshot.result {
        print_results(&result);
      }
      Ok(())
    }
    _ => {
      let failure = snapshot
        .failure
        .unwrap_or_else(|| "unknown failure".to_string());
      bail!(failure)
    }
  }
}

fn print_results(result: &MeasurementResult) {
  println!("Monitoring Results");
  println!("  BPM:            {:.2}", result.bpm);
  println!("  FFT BPM:        {:.2}", result.fft_bpm);
  println!("  Peaks Found:    {}", result.peaks_found);
  println!("  Mean IBI:       {:.2} ms", result.mean_ibi);
  println!("  SDNN:           {:.2} ms", result.sdnn);
  println!("  Signal Quality: {}%", result.signal_quality);

  let peaks: Vec<String> = result.peaks.iter().map(|p| p.to_string()).collect();
  println!("  Peaks:          {}", peaks.join(", "));
}
