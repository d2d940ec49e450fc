use clap::{Parser, Subcommand};
use serde::Serialize;
use snafu::ensure;
use std::io::{self, Write};

use crate::error::{PrefixOnLocalSnafu, Result};
use crate::storage::{AttributeSet, Location, ObjectStoreTarget, StorageOps};

#[derive(Parser, Debug)]
#[command(
    name = "storeops",
    version,
    about = "Create, read, rename, delete and inspect documents on local disk or object storage"
)]
pub struct Args {
    /// Where to operate: local | s3
    #[arg(short, long, global = true, default_value = "local")]
    pub location: Location,

    /// Bucket for object-storage operations
    #[arg(short, long, global = true, env = "STORAGE_BUCKET")]
    pub bucket: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rename a document
    Mv { src: String, dst: String },
    /// Delete a file, folder or object
    Rm {
        path: String,
        /// Delete every object whose key starts with PATH (object storage only)
        #[arg(long)]
        prefix: bool,
    },
    /// Show last-modified time and size
    Stat {
        path: String,
        #[arg(long)]
        json: bool,
    },
    /// Print document content
    Cat { path: String },
    /// Show the size of a local folder
    Du { path: String },
    /// Write DATA to PATH, then upload it when the location is object storage
    Put {
        path: String,
        data: String,
        #[arg(long)]
        remote_path: Option<String>,
        #[arg(long)]
        region: Option<String>,
    },
    /// Upload a local file to the bucket
    Upload {
        path: String,
        #[arg(long)]
        remote_path: Option<String>,
        #[arg(long)]
        region: Option<String>,
    },
    /// Create a bucket if it does not exist
    Mb { name: String },
}

#[derive(Serialize)]
struct StatOutput<'a> {
    path: &'a str,
    last_modified: String,
    last_modified_epoch: f64,
    size: u64,
}

impl<'a> StatOutput<'a> {
    fn new(path: &'a str, attrs: &AttributeSet) -> Self {
        Self {
            path,
            last_modified: attrs.last_modified_rfc3339(),
            last_modified_epoch: attrs.last_modified_epoch(),
            size: attrs.size,
        }
    }
}

fn target_for(
    bucket: Option<&str>,
    remote_path: Option<String>,
    region: Option<String>,
) -> ObjectStoreTarget {
    ObjectStoreTarget {
        bucket: bucket.map(str::to_string),
        remote_path,
        region,
    }
}

pub async fn run(args: Args, ops: StorageOps) -> Result<()> {
    let location = args.location;
    let bucket = args.bucket.as_deref();

    match args.command {
        Command::Mv { src, dst } => {
            println!("{}", ops.rename(location, &src, &dst, bucket).await?);
        }
        Command::Rm { path, prefix } => {
            let status = if prefix {
                ensure!(
                    location == Location::ObjectStore,
                    PrefixOnLocalSnafu {
                        location: format!("{location:?}").to_lowercase()
                    }
                );
                ops.delete_prefix(bucket, &path).await?
            } else {
                ops.delete_exact(location, &path, bucket).await?
            };
            println!("{status}");
        }
        Command::Stat { path, json } => {
            let attrs = ops.get_attributes(location, &path, bucket).await?;
            let output = StatOutput::new(&path, &attrs);
            if json {
                println!(
                    "{}",
                    serde_json::to_string(&output).map_err(io::Error::from)?
                );
            } else {
                println!("path={}", output.path);
                println!("last_modified={}", output.last_modified);
                println!("size={}", output.size);
            }
        }
        Command::Cat { path } => {
            let data = ops.get_doc_data(location, &path, bucket).await?;
            let mut stdout = io::stdout();
            stdout.write_all(data.as_bytes())?;
            stdout.flush()?;
        }
        Command::Du { path } => {
            let size = ops.folder_size(&path).await?;
            println!("{size} {path}");
        }
        Command::Put {
            path,
            data,
            remote_path,
            region,
        } => {
            let target = target_for(bucket, remote_path, region);
            println!(
                "{}",
                ops.create_and_store(location, &path, data, &target).await?
            );
        }
        Command::Upload {
            path,
            remote_path,
            region,
        } => {
            let target = target_for(bucket, remote_path, region);
            println!("{}", ops.upload_file(&path, &target).await?);
        }
        Command::Mb { name } => {
            println!("{}", ops.create_bucket(&name).await?);
        }
    }

    Ok(())
}
