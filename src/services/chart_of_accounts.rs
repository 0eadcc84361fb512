//! Classification of account codes against the Colombian chart of accounts
//! (Plan Único de Cuentas).
//!
//! The first digit of a code is its class, the first two digits its subgroup.
//! The group column splits classes 1 and 2 into current and non-current parts.

pub const UNDEFINED_CLASS: &str = "NO DEFINIDA";
pub const UNDEFINED_SUBGROUP: &str = "NO DEFINIDO";
pub const UNCLASSIFIED_GROUP: &str = "NO CLASIFICADO";

pub fn class_name(code: &str) -> Option<&'static str> {
    let name = match code.get(..1)? {
        "1" => "ACTIVO",
        "2" => "PASIVO",
        "3" => "PATRIMONIO",
        "4" => "INGRESOS",
        "5" => "GASTOS",
        "6" => "COSTOS DE VENTAS",
        "7" => "COSTOS DE PRODUCCIÓN O DE OPERACIÓN",
        "8" => "CUENTAS DE ORDEN DEUDORAS",
        "9" => "CUENTAS DE ORDEN ACREEDORAS",
        _ => return None,
    };
    Some(name)
}

pub fn subgroup_name(code: &str) -> Option<&'static str> {
    let name = match code.get(..2)? {
        "11" => "DISPONIBLE",
        "12" => "INVERSIONES",
        "13" => "DEUDORES",
        "14" => "INVENTARIOS",
        "15" => "PROPIEDADES, PLANTA Y EQUIPO",
        "16" => "INTANGIBLES",
        "17" => "DIFERIDOS",
        "18" => "OTROS ACTIVOS",
        "19" => "VALORIZACIONES",
        "21" => "OBLIGACIONES FINANCIERAS",
        "22" => "PROVEEDORES",
        "23" => "CUENTAS POR PAGAR",
        "24" => "IMPUESTOS, GRAVÁMENES Y TASAS",
        "25" => "OBLIGACIONES LABORALES",
        "26" => "PASIVOS ESTIMADOS Y PROVISIONES",
        "27" => "DIFERIDOS",
        "28" => "OTROS PASIVOS",
        "29" => "BONOS Y PAPELES COMERCIALES",
        "31" => "CAPITAL SOCIAL",
        "32" => "SUPERÁVIT DE CAPITAL",
        "33" => "RESERVAS",
        "34" => "REVALORIZACIÓN DEL PATRIMONIO",
        "35" => "DIVIDENDOS O PARTICIPACIONES DECRETADOS EN ACCIONES",
        "36" => "RESULTADOS DEL EJERCICIO",
        "37" => "RESULTADOS DE EJERCICIOS ANTERIORES",
        "38" => "SUPERÁVIT POR VALORIZACIONES",
        "41" => "OPERACIONALES",
        "42" => "NO OPERACIONALES",
        "47" => "AJUSTES POR INFLACIÓN",
        "51" => "OPERACIONALES DE ADMINISTRACIÓN",
        "52" => "OPERACIONALES DE VENTAS",
        "53" => "NO OPERACIONALES",
        "54" => "IMPUESTO DE RENTA Y COMPLEMENTARIOS",
        "59" => "GANANCIAS Y PÉRDIDAS",
        "61" => "COSTO DE VENTAS Y DE PRESTACIÓN DE SERVICIOS",
        "62" => "COMPRAS",
        "71" => "MATERIA PRIMA",
        "72" => "MANO DE OBRA DIRECTA",
        "73" => "COSTOS INDIRECTOS",
        "74" => "CONTRATOS DE SERVICIOS",
        "81" => "DERECHOS CONTINGENTES",
        "82" => "DEUDORAS FISCALES",
        "83" => "DEUDORAS DE CONTROL",
        "91" => "RESPONSABILIDADES CONTINGENTES",
        "92" => "ACREEDORAS FISCALES",
        "93" => "ACREEDORAS DE CONTROL",
        _ => return None,
    };
    Some(name)
}

/// Current / non-current split. `None` means the code fits no group.
pub fn group_name(code: &str) -> Option<&'static str> {
    let class = code.get(..1)?;
    let subgroup = code.get(..2).unwrap_or("");

    match (class, subgroup) {
        ("1", "11" | "12" | "13" | "14") => Some("ACTIVO CORRIENTE"),
        ("1", "15" | "16" | "17" | "18" | "19") => Some("ACTIVO NO CORRIENTE"),
        ("2", "21" | "22" | "23" | "24" | "25" | "26" | "28") => Some("PASIVO CORRIENTE"),
        ("2", "27" | "29") => Some("PASIVO NO CORRIENTE"),
        ("3", _) => Some("PATRIMONIO"),
        ("4" | "5" | "6" | "7", _) => Some("CUENTA DE RESULTADOS"),
        ("8" | "9", _) => Some("CUENTA DE ORDEN"),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub clase: &'static str,
    pub grupo: &'static str,
    pub subgrupo: &'static str,
}

impl Classification {
    pub fn of(code: &str) -> Self {
        Self {
            clase: class_name(code).unwrap_or(UNDEFINED_CLASS),
            grupo: group_name(code).unwrap_or(UNCLASSIFIED_GROUP),
            subgrupo: subgroup_name(code).unwrap_or(UNDEFINED_SUBGROUP),
        }
    }

    /// Rows without a known group or subgroup are left out of both reports.
    pub fn is_reportable(&self) -> bool {
        self.grupo != UNCLASSIFIED_GROUP && self.subgrupo != UNDEFINED_SUBGROUP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_assets() {
        let c = Classification::of("110505");
        assert_eq!(c.clase, "ACTIVO");
        assert_eq!(c.grupo, "ACTIVO CORRIENTE");
        assert_eq!(c.subgrupo, "DISPONIBLE");
        assert!(c.is_reportable());
    }

    #[test]
    fn test_non_current_liabilities() {
        let c = Classification::of("270505");
        assert_eq!(c.clase, "PASIVO");
        assert_eq!(c.grupo, "PASIVO NO CORRIENTE");
        assert_eq!(c.subgrupo, "DIFERIDOS");
    }

    #[test]
    fn test_result_and_memo_accounts() {
        assert_eq!(group_name("413595"), Some("CUENTA DE RESULTADOS"));
        assert_eq!(group_name("720505"), Some("CUENTA DE RESULTADOS"));
        assert_eq!(group_name("810505"), Some("CUENTA DE ORDEN"));
        assert_eq!(group_name("310505"), Some("PATRIMONIO"));
    }

    #[test]
    fn test_unknown_codes_are_not_reportable() {
        // Class 1 with an unlisted subgroup.
        let c = Classification::of("100505");
        assert_eq!(c.grupo, UNCLASSIFIED_GROUP);
        assert!(!c.is_reportable());

        // Known group, unknown subgroup.
        let c = Classification::of("430505");
        assert_eq!(c.grupo, "CUENTA DE RESULTADOS");
        assert_eq!(c.subgrupo, UNDEFINED_SUBGROUP);
        assert!(!c.is_reportable());

        let c = Classification::of("010101");
        assert_eq!(c.clase, UNDEFINED_CLASS);
        assert!(!c.is_reportable());
    }
}
