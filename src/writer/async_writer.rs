// src/writer/async_writer.rs
use crate::error::{ConvertError, Result};
use crate::mesh::GlobalMesh;
use crate::sampler::FieldSample;
use crate::writer::write_tec;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task;

/// Command for async writer
enum WriteCommand {
    Write {
        path: PathBuf,
        mesh: Arc<GlobalMesh>,
        fields: Vec<FieldSample>,
        response: oneshot::Sender<Result<()>>,
    },
    Close,
}

/// Tecplot writer running on a blocking worker task.
///
/// Files are formatted and persisted off the async executor, one at a
/// time, in submission order. The mesh is shared through an `Arc` since
/// every time step reuses it.
pub struct AsyncTecWriter {
    command_tx: mpsc::UnboundedSender<WriteCommand>,
    handle: Arc<Mutex<Option<task::JoinHandle<Result<()>>>>>,
}

impl AsyncTecWriter {
    pub async fn start() -> Result<Self> {
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let handle = task::spawn_blocking(move || Self::writer_task(command_rx));

        Ok(AsyncTecWriter {
            command_tx,
            handle: Arc::new(Mutex::new(Some(handle))),
        })
    }

    fn writer_task(mut command_rx: mpsc::UnboundedReceiver<WriteCommand>) -> Result<()> {
        while let Some(command) = command_rx.blocking_recv() {
            match command {
                WriteCommand::Write {
                    path,
                    mesh,
                    fields,
                    response,
                } => {
                    let result = write_tec(&path, &mesh, &fields);
                    let _ = response.send(result);
                }
                WriteCommand::Close => break,
            }
        }

        Ok(())
    }

    /// Queue one output file and wait for it to be persisted.
    pub async fn write(
        &self,
        path: impl AsRef<Path>,
        mesh: Arc<GlobalMesh>,
        fields: Vec<FieldSample>,
    ) -> Result<()> {
        let (response_tx, response_rx) = oneshot::channel();

        self.command_tx
            .send(WriteCommand::Write {
                path: path.as_ref().to_path_buf(),
                mesh,
                fields,
                response: response_tx,
            })
            .map_err(|_| ConvertError::WriterClosed)?;

        response_rx.await.map_err(|_| ConvertError::WriterClosed)?
    }

    /// Finish pending writes and stop the worker.
    pub async fn close(&self) -> Result<()> {
        self.command_tx
            .send(WriteCommand::Close)
            .map_err(|_| ConvertError::WriterClosed)?;

        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            handle.await.map_err(|_| ConvertError::WriterClosed)??;
        }

        Ok(())
    }
}

impl Clone for AsyncTecWriter {
    fn clone(&self) -> Self {
        AsyncTecWriter {
            command_tx: self.command_tx.clone(),
            handle: Arc::clone(&self.handle),
        }
    }
}
