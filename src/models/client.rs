//! Client domain model and the DIAN enumerations it carries.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// DIAN document types.
///
/// Closed set of 13 codes. The numeric code is the serialized form; the
/// human-readable label is only used when talking to the POS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DocumentType {
    RegistroCivil,
    TarjetaIdentidad,
    CedulaCiudadania,
    TarjetaExtranjeria,
    CedulaExtranjeria,
    Nit,
    Pasaporte,
    TipoDocumentoExtranjero,
    SinIdentificar,
    Pep,
    Ppt,
    NitOtroPais,
    Nuip,
}

impl DocumentType {
    pub const ALL: [DocumentType; 13] = [
        DocumentType::RegistroCivil,
        DocumentType::TarjetaIdentidad,
        DocumentType::CedulaCiudadania,
        DocumentType::TarjetaExtranjeria,
        DocumentType::CedulaExtranjeria,
        DocumentType::Nit,
        DocumentType::Pasaporte,
        DocumentType::TipoDocumentoExtranjero,
        DocumentType::SinIdentificar,
        DocumentType::Pep,
        DocumentType::Ppt,
        DocumentType::NitOtroPais,
        DocumentType::Nuip,
    ];

    pub fn code(&self) -> u8 {
        match self {
            DocumentType::RegistroCivil => 11,
            DocumentType::TarjetaIdentidad => 12,
            DocumentType::CedulaCiudadania => 13,
            DocumentType::TarjetaExtranjeria => 21,
            DocumentType::CedulaExtranjeria => 22,
            DocumentType::Nit => 31,
            DocumentType::Pasaporte => 41,
            DocumentType::TipoDocumentoExtranjero => 42,
            DocumentType::SinIdentificar => 43,
            DocumentType::Pep => 47,
            DocumentType::Ppt => 48,
            DocumentType::NitOtroPais => 50,
            DocumentType::Nuip => 91,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            11 => Some(DocumentType::RegistroCivil),
            12 => Some(DocumentType::TarjetaIdentidad),
            13 => Some(DocumentType::CedulaCiudadania),
            21 => Some(DocumentType::TarjetaExtranjeria),
            22 => Some(DocumentType::CedulaExtranjeria),
            31 => Some(DocumentType::Nit),
            41 => Some(DocumentType::Pasaporte),
            42 => Some(DocumentType::TipoDocumentoExtranjero),
            43 => Some(DocumentType::SinIdentificar),
            47 => Some(DocumentType::Pep),
            48 => Some(DocumentType::Ppt),
            50 => Some(DocumentType::NitOtroPais),
            91 => Some(DocumentType::Nuip),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::RegistroCivil => "Registro civil",
            DocumentType::TarjetaIdentidad => "Tarjeta de identidad",
            DocumentType::CedulaCiudadania => "Cédula de ciudadanía",
            DocumentType::TarjetaExtranjeria => "Tarjeta de extranjería",
            DocumentType::CedulaExtranjeria => "Cédula de extranjería",
            DocumentType::Nit => "NIT",
            DocumentType::Pasaporte => "Pasaporte",
            DocumentType::TipoDocumentoExtranjero => "Documento de identificación extranjero",
            DocumentType::SinIdentificar => "Sin identificar",
            DocumentType::Pep => "PEP",
            DocumentType::Ppt => "PPT",
            DocumentType::NitOtroPais => "NIT de otro país",
            DocumentType::Nuip => "NUIP",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dt| dt.label() == label)
    }
}

impl TryFrom<u8> for DocumentType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        DocumentType::from_code(code).ok_or_else(|| format!("unknown document type code: {code}"))
    }
}

impl From<DocumentType> for u8 {
    fn from(document_type: DocumentType) -> Self {
        document_type.code()
    }
}

/// DIAN tax responsibilities.
///
/// Serialized as the DIAN string code ("O-13" etc.). The POS omits the
/// field for clients without a registered responsibility, which maps to
/// `R99Pn` ("No responsable").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Responsibilities {
    #[serde(rename = "O-13")]
    O13,
    #[serde(rename = "O-15")]
    O15,
    #[serde(rename = "O-23")]
    O23,
    #[serde(rename = "O-47")]
    O47,
    #[serde(rename = "R-99-PN")]
    R99Pn,
}

impl Responsibilities {
    pub const ALL: [Responsibilities; 5] = [
        Responsibilities::O13,
        Responsibilities::O15,
        Responsibilities::O23,
        Responsibilities::O47,
        Responsibilities::R99Pn,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Responsibilities::O13 => "O-13",
            Responsibilities::O15 => "O-15",
            Responsibilities::O23 => "O-23",
            Responsibilities::O47 => "O-47",
            Responsibilities::R99Pn => "R-99-PN",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "O-13" => Some(Responsibilities::O13),
            "O-15" => Some(Responsibilities::O15),
            "O-23" => Some(Responsibilities::O23),
            "O-47" => Some(Responsibilities::O47),
            "R-99-PN" => Some(Responsibilities::R99Pn),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Responsibilities::O13 => "Gran contribuyente",
            Responsibilities::O15 => "Autorretenedor",
            Responsibilities::O23 => "Agente de retención IVA",
            Responsibilities::O47 => "Régimen simple de tributación",
            Responsibilities::R99Pn => "No responsable",
        }
    }
}

impl Default for Responsibilities {
    fn default() -> Self {
        Responsibilities::R99Pn
    }
}

/// City, state and country codes. Always a complete bundle; a client either
/// carries all five fields or none of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityDetail {
    pub city_name: String,
    pub city_state: String,
    pub city_code: String,
    pub country_code: String,
    pub state_code: String,
}

/// Client record as exposed to callers.
///
/// An empty `email` means "unknown" (the POS may omit the field) and is
/// only rejected on inbound requests, where `validate()` runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_nit_check_digit"))]
pub struct Client {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    pub document: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_digit: Option<i32>,
    pub document_type: DocumentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub responsibilities: Responsibilities,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_detail: Option<CityDetail>,
}

// NIT documents carry a verification digit; a NIT client without one cannot
// be represented on the POS side.
fn validate_nit_check_digit(client: &Client) -> Result<(), ValidationError> {
    if client.document_type == DocumentType::Nit && client.check_digit.is_none() {
        let mut error = ValidationError::new("check_digit_required");
        error.message = Some("check_digit is required when document_type is NIT".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_client(document_type: DocumentType, check_digit: Option<i32>) -> Client {
        Client {
            name: "Julian Herrera".to_string(),
            email: "julian@example.com".to_string(),
            document: 1121923074,
            check_digit,
            document_type,
            phone: None,
            address: None,
            responsibilities: Responsibilities::default(),
            city_detail: None,
        }
    }

    #[test]
    fn document_type_codes_round_trip() {
        for document_type in DocumentType::ALL {
            assert_eq!(
                DocumentType::from_code(document_type.code()),
                Some(document_type)
            );
            assert_eq!(
                DocumentType::from_label(document_type.label()),
                Some(document_type)
            );
        }
    }

    #[test]
    fn document_type_rejects_unknown_code() {
        assert_eq!(DocumentType::from_code(99), None);
        assert!(serde_json::from_str::<DocumentType>("99").is_err());
    }

    #[test]
    fn document_type_serializes_as_code() {
        assert_eq!(serde_json::to_string(&DocumentType::Nit).unwrap(), "31");
        assert_eq!(
            serde_json::from_str::<DocumentType>("13").unwrap(),
            DocumentType::CedulaCiudadania
        );
    }

    #[test]
    fn responsibilities_codes_round_trip() {
        for responsibility in Responsibilities::ALL {
            assert_eq!(
                Responsibilities::from_code(responsibility.code()),
                Some(responsibility)
            );
        }
    }

    #[test]
    fn responsibilities_default_is_not_responsible() {
        assert_eq!(Responsibilities::default(), Responsibilities::R99Pn);
        assert_eq!(Responsibilities::R99Pn.code(), "R-99-PN");
    }

    #[test]
    fn nit_without_check_digit_fails_validation() {
        let client = sample_client(DocumentType::Nit, None);
        assert!(client.validate().is_err());
    }

    #[test]
    fn nit_with_check_digit_validates() {
        let client = sample_client(DocumentType::Nit, Some(7));
        assert!(client.validate().is_ok());
    }

    #[test]
    fn non_nit_without_check_digit_validates() {
        let client = sample_client(DocumentType::CedulaCiudadania, None);
        assert!(client.validate().is_ok());
    }

    #[test]
    fn empty_name_fails_validation() {
        let mut client = sample_client(DocumentType::CedulaCiudadania, None);
        client.name = String::new();
        assert!(client.validate().is_err());
    }

    #[test]
    fn empty_email_fails_validation() {
        let mut client = sample_client(DocumentType::CedulaCiudadania, None);
        client.email = String::new();
        assert!(client.validate().is_err());
    }
}
