//! Document store operations.
//!
//! Documents are keyed by plot and live independently of the booking
//! lifecycle. Attaching does not verify the plot exists; the surrounding
//! UI only offers uploads from a plot's detail view, and a dangling
//! reference is cleaned up by the inventory cascade anyway.

use crate::environment::LedgerEnvironment;
use crate::ledger::Ledger;
use crate::types::{Document, DocumentId, PlotId};

impl Ledger {
    /// Attaches a document to a plot
    pub fn attach_document(
        &mut self,
        env: &LedgerEnvironment,
        plot_id: PlotId,
        filename: impl Into<String>,
        content_ref: impl Into<String>,
    ) -> Document {
        let doc = Document {
            id: DocumentId::new(),
            plot_id,
            filename: filename.into(),
            content_ref: content_ref.into(),
            uploaded_at: env.now(),
        };
        self.documents.push(doc.clone());
        doc
    }

    /// Documents attached to a plot, in attachment order
    #[must_use]
    pub fn documents_for_plot(&self, plot_id: PlotId) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|d| d.plot_id == plot_id)
            .collect()
    }

    /// Detaches a document
    ///
    /// Unknown ids are a no-op.
    pub fn detach_document(&mut self, document_id: DocumentId) {
        self.documents.retain(|d| d.id != document_id);
    }
}
