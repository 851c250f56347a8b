use async_trait::async_trait;
use derive_new::new;
use kernel::model::booking::{Booking, DocumentRef};
use kernel::repository::invoice::InvoiceRenderer;
use shared::error::{AppError, AppResult};
use std::path::Path;

// 請求書をテキストのドキュメントとして出力する素朴な実装。
// 呼び出し側はファイル名への参照だけを扱い、保存方式には関知しない
#[derive(new)]
pub struct FileInvoiceRenderer {
    output_dir: String,
}

#[async_trait]
impl InvoiceRenderer for FileInvoiceRenderer {
    async fn render(&self, booking: &Booking, invoice_number: &str) -> AppResult<DocumentRef> {
        let filename = format!("invoice-{invoice_number}.txt");
        let path = Path::new(&self.output_dir).join(&filename);

        let body = format!(
            "KOS HUNTER\n\
             BUKTI PEMESANAN\n\
             \n\
             Nomor Invoice: {invoice_number}\n\
             Tanggal: {}\n\
             \n\
             Detail Pemesan:\n\
             Nama: {}\n\
             Email: {}\n\
             Telepon: {}\n\
             \n\
             Detail Kos:\n\
             Nama Kos: {}\n\
             Alamat: {}\n\
             Kamar: {} ({})\n\
             \n\
             Detail Pemesanan:\n\
             Tanggal Mulai: {}\n\
             Tanggal Selesai: {}\n\
             Status: {}\n\
             \n\
             Detail Pembayaran:\n\
             Total Harga: Rp {}\n",
            booking.created_at.format("%Y-%m-%d"),
            booking.user_name,
            booking.email,
            booking.phone_number,
            booking.room.kos_name,
            booking.room.alamat,
            booking.room.room_number,
            booking.room.tipe,
            booking.period.start_date(),
            booking.period.end_date(),
            booking.status,
            booking.total_price,
        );

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AppError::InvoiceRenderError(e.to_string()))?;
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| AppError::InvoiceRenderError(e.to_string()))?;

        Ok(DocumentRef(filename))
    }
}
