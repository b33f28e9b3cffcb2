//! User-facing message translation
//!
//! Handlers and errors carry English canonical messages. Before a message
//! leaves the process it is looked up here and replaced with its Indonesian
//! text. Messages without an entry pass through unchanged.

use std::borrow::Cow;

/// English canonical key → Indonesian text.
///
/// Keys ending in `": "` are prefixes: `"Failed to create payment: <detail>"`
/// keeps the detail and swaps only the prefix.
const TRANSLATIONS: &[(&str, &str)] = &[
    ("Method not allowed", "Metode tidak diizinkan"),
    ("Unauthorized", "Tidak terautentikasi"),
    ("Authorization header required", "Header Authorization diperlukan"),
    ("Invalid Authorization format", "Format Authorization tidak valid"),
    ("Invalid token", "Token tidak valid"),
    ("Admin access required", "Akses admin diperlukan"),
    ("User not found", "Pengguna tidak ditemukan"),
    ("Not found", "Tidak ditemukan"),
    ("Failed to fetch payments", "Gagal mengambil riwayat pembayaran"),
    ("Failed to fetch payment summary", "Gagal mengambil ringkasan pembayaran"),
    ("Failed to fetch payment", "Gagal mengambil data pembayaran"),
    ("Failed to fetch students", "Gagal mengambil data siswa"),
    ("Invalid request body", "Isi permintaan tidak valid"),
    ("Username and password are required", "Username dan kata sandi diperlukan"),
    ("Invalid credentials", "Kredensial tidak valid"),
    ("Failed to generate token", "Gagal membuat token"),
    ("NIS and password are required", "NIS dan kata sandi diperlukan"),
    ("Old password and new password are required", "Kata sandi lama dan baru diperlukan"),
    ("New password must be at least 6 characters", "Kata sandi baru harus minimal 6 karakter"),
    ("user_id is required", "user_id diperlukan"),
    ("Invalid user_id", "user_id tidak valid"),
    ("payment_id is required", "payment_id diperlukan"),
    ("Invalid payment_id", "payment_id tidak valid"),
    ("Payment not found", "Pembayaran tidak ditemukan"),
    ("Failed to delete payment", "Gagal menghapus pembayaran"),
    ("NIS is required", "NIS diperlukan"),
    ("Failed to fetch user", "Gagal mengambil data pengguna"),
    ("Failed to create payment: ", "Gagal membuat pembayaran: "),
    ("Failed to update payment: ", "Gagal memperbarui pembayaran: "),
    ("Failed to create student: ", "Gagal membuat siswa: "),
    ("No fields to update", "Tidak ada field untuk diperbarui"),
    ("Old password is incorrect", "Kata sandi lama salah"),
    ("Failed to hash password", "Gagal mengenkripsi kata sandi"),
    ("Failed to update password", "Gagal memperbarui kata sandi"),
    ("Failed to reset password", "Gagal mengatur ulang kata sandi"),
    ("Password changed successfully", "Kata sandi berhasil diubah"),
    ("Nominal must be greater than 0", "Nominal harus lebih besar dari 0"),
    ("Tanggal is required", "Tanggal diperlukan"),
    ("Invalid tanggal format", "Format tanggal tidak valid"),
    (
        "NIS, virtual account, name, and password are required",
        "NIS, virtual account, nama, dan kata sandi diperlukan",
    ),
    ("NIS or virtual account already exists", "NIS atau virtual account sudah terdaftar"),
    ("User ID and new password are required", "ID pengguna dan kata sandi baru diperlukan"),
    ("Can only reset student passwords", "Hanya kata sandi siswa yang dapat diatur ulang"),
    ("Can only delete student accounts", "Hanya akun siswa yang dapat dihapus"),
    ("Failed to delete student", "Gagal menghapus siswa"),
    ("Password is invalid", "Kata sandi tidak valid"),
    ("New password is invalid", "Kata sandi baru tidak valid"),
];

/// Translate an English canonical message into its Indonesian text.
///
/// ```rust
/// use kernel::i18n::translate;
///
/// assert_eq!(translate("Invalid credentials"), "Kredensial tidak valid");
/// assert_eq!(
///     translate("Failed to create payment: boom"),
///     "Gagal membuat pembayaran: boom"
/// );
/// assert_eq!(translate("CORS: Origin not allowed"), "CORS: Origin not allowed");
/// ```
pub fn translate(message: &str) -> Cow<'_, str> {
    if let Some((_, text)) = TRANSLATIONS.iter().find(|(key, _)| *key == message) {
        return Cow::Borrowed(*text);
    }

    for (key, text) in TRANSLATIONS.iter().filter(|(key, _)| key.ends_with(": ")) {
        if let Some(detail) = message.strip_prefix(*key) {
            return Cow::Owned(format!("{text}{detail}"));
        }
    }

    Cow::Borrowed(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(translate("Admin access required"), "Akses admin diperlukan");
        assert_eq!(translate("Method not allowed"), "Metode tidak diizinkan");
    }

    #[test]
    fn test_prefix_keeps_detail() {
        assert_eq!(
            translate("Failed to update payment: Database error"),
            "Gagal memperbarui pembayaran: Database error"
        );
    }

    #[test]
    fn test_unmapped_passes_through() {
        assert_eq!(
            translate("CORS misconfiguration: ALLOWED_ORIGINS is empty"),
            "CORS misconfiguration: ALLOWED_ORIGINS is empty"
        );
        assert_eq!(translate(""), "");
    }

    #[test]
    fn test_prefix_key_alone_is_exact_match() {
        assert_eq!(
            translate("Failed to create student: "),
            "Gagal membuat siswa: "
        );
    }

    #[test]
    fn test_keys_are_unique() {
        for (i, (key, _)) in TRANSLATIONS.iter().enumerate() {
            assert!(
                TRANSLATIONS[i + 1..].iter().all(|(other, _)| other != key),
                "duplicate translation key: {key}"
            );
        }
    }
}
