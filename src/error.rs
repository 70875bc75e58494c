// LegalGuru - A terminal chat client for quick legal questions
// Copyright (C) 2025  LegalGuru contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),
    #[error("Transcript storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl AppError {
    pub const CONFIG_INVALID_EXIT_CODE: i32 = 20;
    pub const STORAGE_UNAVAILABLE_EXIT_CODE: i32 = 21;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigInvalid(_) => Self::CONFIG_INVALID_EXIT_CODE,
            Self::StorageUnavailable(_) => Self::STORAGE_UNAVAILABLE_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigInvalid(detail) => format!(
                "The settings file could not be used: {detail}. \
                 Fix or remove it, then retry."
            ),
            Self::StorageUnavailable(detail) => format!(
                "Cannot prepare the transcript location ({detail}). \
                 Pass `--storage <PATH>` to use another file."
            ),
        }
    }
}
