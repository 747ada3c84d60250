use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("can't open workbook {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("can't read sheet {name:?} in {}: {source}", path.display())]
    Sheet {
        path: PathBuf,
        name: String,
        #[source]
        source: calamine::Error,
    },

    #[error("can't save workbook {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}
