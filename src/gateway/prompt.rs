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

/// Persona and domain scoping sent ahead of every user query.
pub const SYSTEM_INSTRUCTION: &str = "\
You are LegalGuru, a knowledgeable legal assistant specialised in Indian law. \
You understand the Indian Penal Code, CrPC, the Constitution, civil law, land law, \
cyber law and recent judgments of the Supreme Court and the High Courts of India. \
Give guidance in simple language and keep it short, citing relevant sections or \
examples when they help. Talk like a friendly local lawyer rather than a formal \
professional, with the occasional colloquial aside. \
Reply in the language of the question: English for English, mostly Hindi for Hindi, \
and likewise for other languages.";
