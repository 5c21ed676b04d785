use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use log::debug;
use serde_json::{from_reader, to_writer_pretty};
use thiserror::Error;
use crate::domain::{Auction, AuctionId, AuctionRepository, Payment, PaymentRepository, PersistenceError};
use super::StoreData;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse {0}: {1}")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to serialize {0}: {1}")]
    Serialize(PathBuf, #[source] serde_json::Error),
}

impl From<StoreError> for PersistenceError {
    fn from(e: StoreError) -> Self {
        PersistenceError::Storage(e.to_string())
    }
}

pub fn read_store<P: AsRef<Path>>(path: P) -> Result<StoreData, StoreError> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoreData::default()),
        Err(e) => return Err(StoreError::Io(path.to_path_buf(), e)),
    };
    from_reader(BufReader::new(file)).map_err(|e| StoreError::Parse(path.to_path_buf(), e))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes the whole store to a sibling file and renames it over `path`, so
/// the store on disk is either the old or the new document.
pub fn write_store<P: AsRef<Path>>(path: P, data: &StoreData) -> Result<(), StoreError> {
    let path = path.as_ref();
    let temp = temp_path(path);
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp)
        .map_err(|e| StoreError::Io(temp.clone(), e))?;

    let mut writer = BufWriter::new(file);
    to_writer_pretty(&mut writer, data).map_err(|e| StoreError::Serialize(temp.clone(), e))?;
    writer.flush().map_err(|e| StoreError::Io(temp.clone(), e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| StoreError::Io(temp.clone(), e))?;
    drop(writer);

    fs::rename(&temp, path).map_err(|e| StoreError::Io(path.to_path_buf(), e))?;
    Ok(())
}

/// A single JSON document holding auctions and payments. Every change is
/// written straight back to disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<StoreData>,
}

impl JsonFileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let data = read_store(&path)?;
        debug!("Loaded {} auctions and {} payments from {}", data.auctions.len(), data.payments.len(), path.display());
        Ok(JsonFileStore { path, data: Mutex::new(data) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> Result<StoreData, PersistenceError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreData>, PersistenceError> {
        self.data
            .lock()
            .map_err(|e| PersistenceError::Storage(format!("Store lock poisoned: {}", e)))
    }

    // A failed write leaves the previous file in place, and the in-memory
    // copy is rolled back to match it.
    fn modify<F>(&self, change: F) -> Result<(), PersistenceError>
    where
        F: FnOnce(&mut StoreData) -> Result<(), PersistenceError>,
    {
        let mut data = self.lock()?;
        let before = data.clone();
        change(&mut data)?;
        if let Err(e) = write_store(&self.path, &data) {
            *data = before;
            return Err(e.into());
        }
        Ok(())
    }
}

impl AuctionRepository for JsonFileStore {
    fn currently_open(&self) -> Result<Vec<Auction>, PersistenceError> {
        Ok(self.lock()?.currently_open())
    }

    fn closed(&self) -> Result<Vec<Auction>, PersistenceError> {
        Ok(self.lock()?.closed())
    }

    fn update(&self, auction: &Auction) -> Result<(), PersistenceError> {
        self.modify(|data| data.update(auction))
    }
}

impl PaymentRepository for JsonFileStore {
    fn save(&self, payment: &Payment) -> Result<(), PersistenceError> {
        self.modify(|data| {
            data.save(payment);
            Ok(())
        })
    }

    fn payment_for(&self, auction_id: AuctionId) -> Result<Option<Payment>, PersistenceError> {
        Ok(self.lock()?.payment_for(auction_id))
    }
}
